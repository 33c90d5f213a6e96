//! Error types for row extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a compensation table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Extension is not a recognized tabular format.
    #[error("unsupported file format '{extension}' for {path} (expected {expected})")]
    UnsupportedFormat {
        path: PathBuf,
        extension: String,
        expected: &'static str,
    },

    /// Failed to parse delimited text.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    // === Shape Errors ===
    /// No header row could be found.
    #[error("no header row in {path}")]
    NoHeader { path: PathBuf },

    /// Nothing left to assemble after filtering.
    #[error("empty dataset in {path}: {reason}")]
    EmptyDataset { path: PathBuf, reason: String },

    /// Two headers normalize to the same employer identity.
    #[error(
        "duplicate employer column '{name}' in {path} (columns {first_column} and {second_column})"
    )]
    DuplicateEmployer {
        path: PathBuf,
        name: String,
        first_column: usize,
        second_column: usize,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "input file not found: /path/to/file.csv");
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IngestError::io("data.csv", source);
        assert!(matches!(err, IngestError::FileNotFound { .. }));

        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = IngestError::io("data.csv", source);
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
