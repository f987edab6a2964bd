use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::entities::cell::Cell;
use crate::domain::entities::table::RawTable;
use crate::error::ProcessError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Byte offsets of every `\n`, for mapping offsets to 1-based lines.
struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    fn new(bytes: &[u8]) -> Self {
        let newlines = bytes
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte == b'\n')
            .map(|(offset, _)| offset)
            .collect();
        Self { newlines }
    }

    fn line_at(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&newline| newline < offset) + 1
    }

    fn line_start(&self, line: usize) -> usize {
        line.checked_sub(2)
            .and_then(|idx| self.newlines.get(idx))
            .map_or(0, |newline| newline + 1)
    }
}

/// Rows keep their source line. The csv crate drops empty lines, so they are
/// put back as empty rows between the previous record and the next one.
pub fn read_csv_table(bytes: &[u8]) -> Result<RawTable, ProcessError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ProcessError::unreadable("file is empty"));
    }
    if bytes.contains(&0) {
        return Err(ProcessError::unreadable("binary content is not a csv table"));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);
    let lines = LineIndex::new(bytes);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut consumed = 0;
    while reader
        .read_record(&mut record)
        .map_err(|err| ProcessError::unreadable(format!("failed to parse csv record: {err}")))?
    {
        let start = bytes
            .get(consumed..)
            .and_then(|rest| rest.iter().position(|byte| !matches!(byte, b'\r' | b'\n')))
            .map_or(bytes.len(), |skipped| consumed + skipped);
        let row_number = lines.line_at(start);

        for line in lines.line_at(consumed)..row_number {
            if lines.line_start(line) >= consumed {
                rows.push((line, Vec::new()));
            }
        }
        rows.push((row_number, record.iter().map(Cell::text).collect()));
        consumed = reader.position().byte() as usize;
    }

    RawTable::from_rows(rows)
}
