use std::collections::BTreeSet;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What a column means to the EMD register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Payee,
    Amount,
    TenderNo,
    Work,
    Pan,
    SubmittedOn,
    RefundedOn,
    /// Checked against its kind and carried through as an extra column.
    #[default]
    Other,
}

impl ColumnRole {
    /// Kind forced by the role; `None` for free text roles.
    fn fixed_kind(self) -> Option<ColumnKind> {
        match self {
            ColumnRole::Amount => Some(ColumnKind::Amount),
            ColumnRole::SubmittedOn | ColumnRole::RefundedOn => Some(ColumnKind::Date),
            ColumnRole::Payee | ColumnRole::TenderNo | ColumnRole::Work | ColumnRole::Pan => {
                Some(ColumnKind::Text)
            }
            ColumnRole::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Amount,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub header: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub role: ColumnRole,
    #[serde(default)]
    pub kind: Option<ColumnKind>,
    #[serde(default)]
    pub required: bool,
}

impl ColumnSpec {
    pub fn new(header: &str, role: ColumnRole, required: bool, aliases: &[&str]) -> Self {
        Self {
            header: header.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            role,
            kind: None,
            required,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.role
            .fixed_kind()
            .or(self.kind)
            .unwrap_or(ColumnKind::Text)
    }

    fn matches(&self, normalized_header: &str) -> bool {
        std::iter::once(&self.header)
            .chain(self.aliases.iter())
            .any(|name| normalize_header(name) == normalized_header)
    }
}

pub fn normalize_header(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new(
            "Bidder",
            ColumnRole::Payee,
            true,
            &["Payee", "Payee Name", "Bidder Name", "Name"],
        ),
        ColumnSpec::new(
            "Amount",
            ColumnRole::Amount,
            true,
            &["EMD Amount", "EMD", "Refund Amount", "Amount (Rs)"],
        ),
        ColumnSpec::new(
            "Tender No",
            ColumnRole::TenderNo,
            false,
            &["Tender Number", "Tender"],
        ),
        ColumnSpec::new(
            "Work",
            ColumnRole::Work,
            false,
            &["Work Description", "Name of Work"],
        ),
        ColumnSpec::new("PAN", ColumnRole::Pan, false, &["PAN Number", "PAN No"]),
        ColumnSpec::new(
            "Submission Date",
            ColumnRole::SubmittedOn,
            false,
            &["Date of Submission", "Deposit Date"],
        ),
        ColumnSpec::new("Refund Date", ColumnRole::RefundedOn, false, &[]),
    ]
}

pub fn default_date_formats() -> Vec<String> {
    ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"]
        .iter()
        .map(|fmt| fmt.to_string())
        .collect()
}

/// A validated column schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
    date_formats: Vec<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            date_formats: default_date_formats(),
        }
    }
}

impl Schema {
    pub fn new(columns: Vec<ColumnSpec>, date_formats: Vec<String>) -> Result<Self, ConfigError> {
        if columns.is_empty() {
            return Err(ConfigError::schema("at least one column is required"));
        }

        let mut seen_roles = BTreeSet::new();
        for column in &columns {
            if column.header.trim().is_empty() {
                return Err(ConfigError::schema("column header must not be empty"));
            }
            if column.role != ColumnRole::Other && !seen_roles.insert(column.role) {
                return Err(ConfigError::schema(format!(
                    "role {:?} is assigned to more than one column",
                    column.role
                )));
            }
            if let (Some(fixed), Some(declared)) = (column.role.fixed_kind(), column.kind) {
                if fixed != declared {
                    return Err(ConfigError::schema(format!(
                        "column {} has kind {declared:?} but its role needs {fixed:?}",
                        column.header
                    )));
                }
            }
        }

        for role in [ColumnRole::Payee, ColumnRole::Amount] {
            match columns.iter().find(|column| column.role == role) {
                Some(column) if column.required => {}
                Some(column) => {
                    return Err(ConfigError::schema(format!(
                        "column {} must be required",
                        column.header
                    )))
                }
                None => {
                    return Err(ConfigError::schema(format!(
                        "a column with role {role:?} is required"
                    )))
                }
            }
        }

        if date_formats.is_empty() {
            return Err(ConfigError::schema("at least one date format is required"));
        }
        for format in &date_formats {
            let invalid = format.trim().is_empty()
                || StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
            if invalid {
                return Err(ConfigError::schema(format!("invalid date format {format:?}")));
            }
        }

        Ok(Self {
            columns,
            date_formats,
        })
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn date_formats(&self) -> &[String] {
        &self.date_formats
    }

    pub fn header_for(&self, role: ColumnRole) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| column.role == role)
            .map(|column| column.header.as_str())
    }

    /// Matches schema columns against a file header. Each file column is
    /// claimed by at most one schema column, first match wins.
    pub fn layout(&self, headers: &[String]) -> ColumnLayout {
        let normalized = headers
            .iter()
            .map(|header| normalize_header(header))
            .collect::<Vec<_>>();
        let mut claimed = vec![false; headers.len()];

        let positions = self
            .columns
            .iter()
            .map(|column| {
                let found = normalized
                    .iter()
                    .enumerate()
                    .position(|(idx, header)| !claimed[idx] && column.matches(header));
                if let Some(idx) = found {
                    claimed[idx] = true;
                }
                found
            })
            .collect::<Vec<_>>();

        let missing_required = self
            .columns
            .iter()
            .zip(&positions)
            .filter(|(column, position)| column.required && position.is_none())
            .map(|(column, _)| column.header.clone())
            .collect();

        let unclaimed = claimed
            .iter()
            .enumerate()
            .filter(|(_, claimed)| !**claimed)
            .map(|(idx, _)| idx)
            .collect();

        ColumnLayout {
            positions,
            unclaimed,
            missing_required,
        }
    }
}

/// Where each schema column sits in a particular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Indexed like `Schema::columns`.
    pub positions: Vec<Option<usize>>,
    /// File columns no schema column claimed.
    pub unclaimed: Vec<usize>,
    pub missing_required: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn default_schema_is_valid() {
        let defaults = Schema::default();
        let rebuilt = Schema::new(default_columns(), default_date_formats())
            .expect("default schema should validate");
        assert_eq!(defaults, rebuilt);
        assert_eq!(defaults.header_for(ColumnRole::Payee), Some("Bidder"));
    }

    #[test]
    fn layout_matches_aliases_case_insensitively() {
        let schema = Schema::default();
        let layout = schema.layout(&headers(&["  payee   NAME ", "EMD Amount", "Remarks"]));

        assert_eq!(layout.positions[0], Some(0));
        assert_eq!(layout.positions[1], Some(1));
        assert!(layout.missing_required.is_empty());
        assert_eq!(layout.unclaimed, vec![2]);
    }

    #[test]
    fn layout_reports_missing_required_columns() {
        let schema = Schema::default();
        let layout = schema.layout(&headers(&["Bidder"]));
        assert_eq!(layout.missing_required, vec!["Amount".to_string()]);
    }

    #[test]
    fn duplicate_roles_are_rejected() {
        let mut columns = default_columns();
        columns.push(ColumnSpec::new("Payer", ColumnRole::Payee, true, &[]));
        let err = Schema::new(columns, default_date_formats()).expect_err("should fail");
        assert!(err.to_string().contains("more than one column"));
    }

    #[test]
    fn optional_amount_column_is_rejected() {
        let mut columns = default_columns();
        columns[1].required = false;
        assert!(Schema::new(columns, default_date_formats()).is_err());
    }

    #[test]
    fn conflicting_kind_is_rejected() {
        let mut columns = default_columns();
        columns[1].kind = Some(ColumnKind::Text);
        assert!(Schema::new(columns, default_date_formats()).is_err());
    }

    #[test]
    fn invalid_date_format_is_rejected() {
        let err = Schema::new(default_columns(), vec!["%Q".to_string()]).expect_err("should fail");
        assert!(err.to_string().contains("invalid date format"));
    }

    #[test]
    fn other_role_defaults_to_text_kind() {
        let spec = ColumnSpec::new("Receipt No", ColumnRole::Other, true, &[]);
        assert_eq!(spec.kind(), ColumnKind::Text);
    }
}
