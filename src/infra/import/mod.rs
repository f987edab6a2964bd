pub mod csv;
pub mod xlsx;

use tracing::debug;

use crate::domain::entities::table::RawTable;
use crate::domain::entities::upload::UploadedFile;
use crate::error::ProcessError;
use crate::usecase::ports::reader::TableReader;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Workbook,
}

impl FileFormat {
    pub fn detect(file: &UploadedFile) -> Self {
        match file.extension().as_deref() {
            Some("csv" | "txt") => Self::Csv,
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::Workbook,
            _ => Self::sniff(&file.bytes),
        }
    }

    fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            Self::Workbook
        } else {
            Self::Csv
        }
    }
}

/// Reads CSV and workbook uploads, picking the parser per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetReader;

impl TableReader for SpreadsheetReader {
    fn read(&self, file: &UploadedFile) -> Result<RawTable, ProcessError> {
        let format = FileFormat::detect(file);
        debug!(file = %file.name, ?format, bytes = file.bytes.len(), "reading upload");
        match format {
            FileFormat::Csv => csv::read_csv_table(&file.bytes),
            FileFormat::Workbook => xlsx::read_workbook_table(&file.bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_decides_before_content() {
        let file = UploadedFile::new("deposits.CSV", b"PK\x03\x04".to_vec());
        assert_eq!(FileFormat::detect(&file), FileFormat::Csv);

        let file = UploadedFile::new("deposits.ods", b"Bidder,Amount".to_vec());
        assert_eq!(FileFormat::detect(&file), FileFormat::Workbook);
    }

    #[test]
    fn unknown_extension_sniffs_magic_bytes() {
        let zip = UploadedFile::new("upload", b"PK\x03\x04rest".to_vec());
        let ole = UploadedFile::new("upload.bin", vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1]);
        let text = UploadedFile::new("upload.dat", b"Bidder,Amount\n".to_vec());

        assert_eq!(FileFormat::detect(&zip), FileFormat::Workbook);
        assert_eq!(FileFormat::detect(&ole), FileFormat::Workbook);
        assert_eq!(FileFormat::detect(&text), FileFormat::Csv);
    }

    #[test]
    fn reader_dispatches_to_csv() {
        let file = UploadedFile::new("deposits.csv", b"Bidder,Amount\nAcme,10\n".to_vec());
        let table = SpreadsheetReader.read(&file).expect("csv should read");
        assert_eq!(table.headers, vec!["Bidder", "Amount"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn corrupt_workbook_is_unreadable() {
        let file = UploadedFile::new("deposits.xlsx", b"not a workbook".to_vec());
        let err = SpreadsheetReader.read(&file).expect_err("should fail");
        assert!(matches!(err, ProcessError::UnreadableFile { .. }));
    }
}
