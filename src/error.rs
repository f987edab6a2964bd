use thiserror::Error;

/// Fatal processing failure: nothing about the upload could be read as a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("unreadable file: {reason}")]
    UnreadableFile { reason: String },
}

impl ProcessError {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::UnreadableFile {
            reason: reason.into(),
        }
    }
}

/// A single reason a row was rejected. Rows may carry several.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    #[error("missing {column}")]
    Missing { column: String },

    #[error("unparseable amount in {column}: {raw:?}")]
    UnparseableAmount { column: String, raw: String },

    #[error("{column} must be greater than zero")]
    NonPositiveAmount { column: String },

    #[error("unparseable date in {column}: {raw:?}")]
    UnparseableDate { column: String, raw: String },

    #[error("invalid PAN in {column}: {raw:?}")]
    InvalidPan { column: String, raw: String },

    #[error("{refunded} precedes {submitted}")]
    RefundBeforeSubmission { refunded: String, submitted: String },
}

impl RowIssue {
    pub fn missing(column: impl Into<String>) -> Self {
        Self::Missing {
            column: column.into(),
        }
    }

    /// Column the issue is about; the first one for cross-column rules.
    pub fn column(&self) -> &str {
        match self {
            Self::Missing { column }
            | Self::UnparseableAmount { column, .. }
            | Self::NonPositiveAmount { column }
            | Self::UnparseableDate { column, .. }
            | Self::InvalidPan { column, .. } => column,
            Self::RefundBeforeSubmission { refunded, .. } => refunded,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid schema: {message}")]
    Schema { message: String },
}

impl ConfigError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }
}
