pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod platform;
pub mod ui;
pub mod usecase;

pub use domain::entities::cell::Cell;
pub use domain::entities::record::{Amount, EmdRecord, EmdStatus, ExtraField};
pub use domain::entities::result::{ProcessingResult, ProcessingSummary, RejectedRow};
pub use domain::entities::schema::{ColumnKind, ColumnRole, ColumnSpec, Schema};
pub use domain::entities::table::{RawTable, SpreadsheetRow};
pub use domain::entities::upload::UploadedFile;
pub use error::{ConfigError, ProcessError, RowIssue};
pub use infra::import::{FileFormat, SpreadsheetReader};
pub use usecase::ports::reader::TableReader;
pub use usecase::services::export_service::{ExportFormat, ExportKind, ExportService};
pub use usecase::services::process_service::ProcessService;
