//! Highlighted employer resolution.

use tracing::debug;

use compgrapher_model::EmployerColumn;

use crate::error::{Result, ValidateError};

/// Resolves the highlighted employer by normalized name.
///
/// `None` selects the first employer column.
pub fn resolve_highlight(
    employers: &[EmployerColumn],
    requested: Option<&str>,
) -> Result<EmployerColumn> {
    let Some(requested) = requested else {
        let first = employers.first().ok_or(ValidateError::NoEmployers)?;
        debug!(employer = %first.name, "defaulting highlight to first employer");
        return Ok(first.clone());
    };
    employers
        .iter()
        .find(|employer| employer.matches(requested))
        .cloned()
        .ok_or_else(|| ValidateError::UnknownClient {
            requested: requested.to_string(),
            available: employers.iter().map(|e| e.name.clone()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employers() -> Vec<EmployerColumn> {
        vec![EmployerColumn::new("A", 1), EmployerColumn::new("Acme Town", 2)]
    }

    #[test]
    fn defaults_to_first_employer() {
        assert_eq!(resolve_highlight(&employers(), None).unwrap().name, "A");
    }

    #[test]
    fn matches_ignoring_case_and_spacing() {
        let found = resolve_highlight(&employers(), Some("  acme   TOWN")).unwrap();
        assert_eq!(found.index, 2);
    }

    #[test]
    fn unknown_client_lists_available() {
        let err = resolve_highlight(&employers(), Some("Acme")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown client 'Acme' (available employers: A, Acme Town)"
        );
    }

    #[test]
    fn empty_employer_set() {
        assert_eq!(resolve_highlight(&[], None), Err(ValidateError::NoEmployers));
    }
}
