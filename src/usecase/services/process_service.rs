use std::sync::Arc;

use tracing::info;

use crate::domain::entities::result::{ProcessingResult, RejectedRow};
use crate::domain::entities::schema::Schema;
use crate::domain::entities::table::RawTable;
use crate::domain::entities::upload::UploadedFile;
use crate::domain::rules::validate::build_record;
use crate::error::ProcessError;
use crate::usecase::ports::reader::TableReader;

pub struct ProcessService {
    reader: Arc<dyn TableReader>,
    schema: Schema,
}

impl ProcessService {
    pub fn new(reader: Arc<dyn TableReader>, schema: Schema) -> Self {
        Self { reader, schema }
    }

    pub fn process(&self, file: &UploadedFile) -> Result<ProcessingResult, ProcessError> {
        let table = self.reader.read(file)?;
        let result = process_table(&self.schema, table);
        let summary = &result.summary;
        info!(
            file = %file.name,
            rows_read = summary.rows_read,
            accepted = summary.rows_accepted,
            rejected = summary.rows_rejected,
            blank_rows = summary.blank_rows_skipped,
            "processed upload"
        );
        Ok(result)
    }
}

/// Validates every row of an already parsed table, keeping source order in
/// both the accepted and the rejected list.
pub fn process_table(schema: &Schema, table: RawTable) -> ProcessingResult {
    let layout = schema.layout(&table.headers);

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for row in &table.rows {
        match build_record(schema, &layout, &table.headers, row) {
            Ok(record) => records.push(record),
            Err(issues) => rejected.push(RejectedRow {
                row_number: row.row_number,
                issues,
            }),
        }
    }

    ProcessingResult::new(
        table.headers,
        layout.missing_required,
        records,
        rejected,
        table.blank_rows_skipped,
    )
}
