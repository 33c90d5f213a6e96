//! Error types for the preparation pipeline.

use thiserror::Error;

use compgrapher_ingest::IngestError;
use compgrapher_validate::ValidateError;

/// Fatal pipeline errors. Data-quality findings are reported, not raised.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The alternating high/low row contract is broken.
    #[error("misaligned data at row {line}: {reason}")]
    MisalignedData { line: usize, reason: String },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Validate(#[from] ValidateError),
}

/// A position with no contributing values; skipped by aggregation only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("insufficient data for position '{position}': no employer supplied a range")]
pub struct InsufficientData {
    pub position: String,
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misaligned_message_names_row() {
        let err = CoreError::MisalignedData {
            line: 6,
            reason: "trailing high row 'Clerk' has no low row".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "misaligned data at row 6: trailing high row 'Clerk' has no low row"
        );
    }

    #[test]
    fn unknown_client_passes_through() {
        let err: CoreError = ValidateError::UnknownClient {
            requested: "Acme".to_string(),
            available: vec!["A".to_string()],
        }
        .into();
        assert!(matches!(
            err,
            CoreError::Validate(ValidateError::UnknownClient { .. })
        ));
    }
}
