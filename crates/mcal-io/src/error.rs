//! I/O error types.

use thiserror::Error;

/// Result type for export/import operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing text formats.
#[derive(Debug, Error)]
pub enum IoError {
    /// Malformed input.
    #[error("parse error: {0}")]
    Parse(String),

    /// Writing an empty session has no meaningful output.
    #[error("no samples to export")]
    Empty,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
