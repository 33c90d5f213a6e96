//! Error types for validation.

use thiserror::Error;

/// Errors that stop validation. Data-quality findings are never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidateError {
    /// The requested highlighted employer is not an employer column.
    #[error("unknown client '{requested}' (available employers: {})", .available.join(", "))]
    UnknownClient {
        requested: String,
        available: Vec<String>,
    },

    /// There is no employer column to highlight.
    #[error("no employer columns to highlight")]
    NoEmployers,
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
