//! ICC error types.

use thiserror::Error;

/// Result type for ICC operations.
pub type IccResult<T> = Result<T, IccError>;

/// Errors that can occur during ICC encoding or decoding.
#[derive(Debug, Error)]
pub enum IccError {
    /// Profile text fields must be ASCII in v2 text tags.
    #[error("non-ASCII text in profile field: {0:?}")]
    NonAsciiText(String),

    /// Invalid or truncated profile data.
    #[error("invalid profile data: {0}")]
    InvalidProfile(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
