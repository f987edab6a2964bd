use crate::domain::entities::result::ProcessingResult;
use crate::domain::rules::amount::format_rupees;

/// Rejections shown inline before the notice is truncated.
pub const SKIPPED_PREVIEW_LIMIT: usize = 5;

pub fn processed_status(file_name: &str, result: &ProcessingResult) -> String {
    let summary = &result.summary;
    format!(
        "{file_name}: {} accepted, {} rejected, total {}",
        summary.rows_accepted,
        summary.rows_rejected,
        format_rupees(summary.total_amount)
    )
}

pub fn missing_columns_message(result: &ProcessingResult) -> Option<String> {
    if result.missing_columns.is_empty() {
        return None;
    }
    Some(format!(
        "Required columns not found: {}",
        result.missing_columns.join(", ")
    ))
}

pub fn optional_text(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
