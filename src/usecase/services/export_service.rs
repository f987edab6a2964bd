use std::path::Path;

use anyhow::Result;

use crate::domain::entities::record::EmdRecord;
use crate::domain::entities::result::ProcessingResult;
use crate::domain::entities::upload::UploadedFile;
use crate::infra::export::csv::{encode_csv, write_export};
use crate::infra::export::xlsx::encode_xlsx;
use crate::infra::export::{ExportTable, ExportValue};

pub const EXPORT_COLUMNS: [&str; 12] = [
    "Row",
    "Payee",
    "Amount",
    "Amount (Formatted)",
    "Amount in Words",
    "Status",
    "Tender No",
    "Work",
    "PAN",
    "Submission Date",
    "Refund Date",
    "Days Held",
];

pub const REJECTION_COLUMNS: [&str; 2] = ["Row", "Reasons"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Picked from the saved file's extension; anything but `.xlsx` is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => ExportFormat::Xlsx,
            _ => ExportFormat::Csv,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExportService {
    include_extra_columns: bool,
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExportService {
    pub fn new(include_extra_columns: bool) -> Self {
        Self {
            include_extra_columns,
        }
    }

    pub fn encode(
        &self,
        result: &ProcessingResult,
        kind: ExportKind,
        format: ExportFormat,
    ) -> Result<Vec<u8>> {
        match (kind, format) {
            (ExportKind::Accepted, ExportFormat::Csv) => self.to_csv(result),
            (ExportKind::Accepted, ExportFormat::Xlsx) => self.to_xlsx(result),
            (ExportKind::Rejected, ExportFormat::Csv) => self.rejections_to_csv(result),
            (ExportKind::Rejected, ExportFormat::Xlsx) => self.rejections_to_xlsx(result),
        }
    }

    /// Accepted records, one line each, in processing order.
    pub fn to_csv(&self, result: &ProcessingResult) -> Result<Vec<u8>> {
        encode_csv(&self.records_table(result))
    }

    pub fn to_xlsx(&self, result: &ProcessingResult) -> Result<Vec<u8>> {
        encode_xlsx(&self.records_table(result))
    }

    pub fn rejections_to_csv(&self, result: &ProcessingResult) -> Result<Vec<u8>> {
        encode_csv(&rejections_table(result))
    }

    pub fn rejections_to_xlsx(&self, result: &ProcessingResult) -> Result<Vec<u8>> {
        encode_xlsx(&rejections_table(result))
    }

    pub fn save(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        write_export(path, bytes)
    }

    fn records_table(&self, result: &ProcessingResult) -> ExportTable {
        let extra_columns = if self.include_extra_columns {
            result.extra_columns()
        } else {
            Vec::new()
        };

        let headers = EXPORT_COLUMNS
            .iter()
            .map(|column| column.to_string())
            .chain(extra_columns.iter().map(|&column| result.column_header(column)))
            .collect();
        let rows = result
            .records
            .iter()
            .map(|record| record_row(record, &extra_columns))
            .collect();

        ExportTable {
            sheet: "EMD Records",
            headers,
            rows,
        }
    }
}

fn rejections_table(result: &ProcessingResult) -> ExportTable {
    ExportTable {
        sheet: "Rejected Rows",
        headers: REJECTION_COLUMNS.map(str::to_string).to_vec(),
        rows: result
            .rejected
            .iter()
            .map(|row| {
                vec![
                    ExportValue::Integer(row.row_number as i64),
                    row.reasons().into(),
                ]
            })
            .collect(),
    }
}

fn record_row(record: &EmdRecord, extra_columns: &[usize]) -> Vec<ExportValue> {
    let mut row = vec![
        ExportValue::Integer(record.row_number as i64),
        record.payee.as_str().into(),
        ExportValue::Amount(record.amount),
        record.formatted_amount.as_str().into(),
        record.amount_in_words.as_str().into(),
        record.status.label().into(),
        optional_text(record.tender_no.as_deref()),
        optional_text(record.work.as_deref()),
        optional_text(record.pan.as_deref()),
        record.submitted_on.map_or(ExportValue::Empty, ExportValue::Date),
        record.refunded_on.map_or(ExportValue::Empty, ExportValue::Date),
        record.days_held.map_or(ExportValue::Empty, ExportValue::Integer),
    ];
    row.extend(
        extra_columns
            .iter()
            .map(|&column| optional_text(record.extra_value(column))),
    );
    row
}

fn optional_text(value: Option<&str>) -> ExportValue {
    value.map_or(ExportValue::Empty, ExportValue::from)
}

/// `deposits.xlsx` -> `deposits_processed.csv`.
pub fn default_export_name(upload: &UploadedFile, format: ExportFormat) -> String {
    format!("{}_processed.{}", upload.stem(), format.extension())
}

pub fn default_rejections_name(upload: &UploadedFile, format: ExportFormat) -> String {
    format!("{}_rejected.{}", upload.stem(), format.extension())
}
