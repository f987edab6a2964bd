use crate::domain::entities::record::{Amount, EmdRecord, EmdStatus};
use crate::error::RowIssue;

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub row_number: usize,
    pub issues: Vec<RowIssue>,
}

impl RejectedRow {
    pub fn reasons(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessingSummary {
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub rows_rejected: usize,
    pub blank_rows_skipped: usize,
    pub total_amount: Amount,
    pub refunded_count: usize,
    pub pending_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingResult {
    pub headers: Vec<String>,
    pub missing_columns: Vec<String>,
    pub records: Vec<EmdRecord>,
    pub rejected: Vec<RejectedRow>,
    pub summary: ProcessingSummary,
}

impl ProcessingResult {
    pub fn new(
        headers: Vec<String>,
        missing_columns: Vec<String>,
        records: Vec<EmdRecord>,
        rejected: Vec<RejectedRow>,
        blank_rows_skipped: usize,
    ) -> Self {
        let refunded_count = records
            .iter()
            .filter(|record| record.status == EmdStatus::Refunded)
            .count();
        let summary = ProcessingSummary {
            rows_read: records.len() + rejected.len(),
            rows_accepted: records.len(),
            rows_rejected: rejected.len(),
            blank_rows_skipped,
            total_amount: records.iter().map(|record| record.amount).sum(),
            refunded_count,
            pending_count: records.len() - refunded_count,
        };
        Self {
            headers,
            missing_columns,
            records,
            rejected,
            summary,
        }
    }

    /// Sheet columns carried as extras by at least one record, left to right.
    pub fn extra_columns(&self) -> Vec<usize> {
        let mut columns = self
            .records
            .iter()
            .flat_map(|record| record.extra.iter().map(|field| field.column))
            .collect::<Vec<_>>();
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    pub fn column_header(&self, column: usize) -> String {
        self.headers
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("Column {}", column + 1))
    }

    /// Non-blocking notice such as `2 rows skipped: row 3: missing Bidder; ...`.
    pub fn skipped_summary(&self, limit: usize) -> Option<String> {
        if self.rejected.is_empty() {
            return None;
        }
        let count = self.rejected.len();
        let noun = if count == 1 { "row" } else { "rows" };
        let mut parts = self
            .rejected
            .iter()
            .take(limit)
            .map(|row| format!("row {}: {}", row.row_number, row.reasons()))
            .collect::<Vec<_>>();
        if count > limit {
            parts.push(format!("and {} more", count - limit));
        }
        Some(format!("{count} {noun} skipped: {}", parts.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(row_number: usize, column: &str) -> RejectedRow {
        RejectedRow {
            row_number,
            issues: vec![RowIssue::missing(column)],
        }
    }

    #[test]
    fn skipped_summary_is_none_without_rejections() {
        let result = ProcessingResult::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), 0);
        assert_eq!(result.skipped_summary(3), None);
        assert_eq!(result.summary, ProcessingSummary::default());
    }

    #[test]
    fn skipped_summary_truncates_after_limit() {
        let result = ProcessingResult::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![
                rejected(3, "Bidder"),
                rejected(5, "Amount"),
                rejected(8, "Bidder"),
            ],
            0,
        );

        assert_eq!(
            result.skipped_summary(2).as_deref(),
            Some("3 rows skipped: row 3: missing Bidder; row 5: missing Amount; and 1 more")
        );
        assert_eq!(result.summary.rows_read, 3);
        assert_eq!(result.summary.rows_rejected, 3);
    }

    #[test]
    fn reasons_join_every_issue() {
        let row = RejectedRow {
            row_number: 2,
            issues: vec![RowIssue::missing("Bidder"), RowIssue::missing("Amount")],
        };
        assert_eq!(row.reasons(), "missing Bidder; missing Amount");
    }
}
