use crate::domain::entities::table::RawTable;
use crate::domain::entities::upload::UploadedFile;
use crate::error::ProcessError;

/// Turns uploaded bytes into a header plus rows. Implementations must keep
/// source row order and fail only when the file is not tabular at all.
pub trait TableReader: Send + Sync {
    fn read(&self, file: &UploadedFile) -> Result<RawTable, ProcessError>;
}
