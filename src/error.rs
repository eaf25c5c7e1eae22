use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the workbook accessor.
///
/// Absent rows and cells are not errors; queries for those return `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// Opening or saving the backing file failed (missing, corrupt, unwritable)
    #[error("cannot access {}: {message}", path.display())]
    FileAccess { path: PathBuf, message: String },

    /// Sheet index past the end of the workbook
    #[error("sheet index {index} out of bounds (count: {count})")]
    SheetOutOfBounds { index: usize, count: usize },

    /// Sheet name already taken
    #[error("sheet name already exists: {0}")]
    DuplicateSheet(String),

    /// A write was issued before any sheet was created or selected
    #[error("no sheet selected (create or select a sheet first)")]
    NoSheetSelected,
}
