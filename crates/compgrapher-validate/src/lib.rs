//! Validation for assembled compensation data.
//!
//! Data-quality problems become [`Issue`]s in a [`ValidationReport`]; only
//! an unresolvable highlighted employer is an error.

pub mod checks;
pub mod error;
pub mod highlight;

pub use error::{Result, ValidateError};
pub use highlight::resolve_highlight;

use tracing::{debug, info};

use compgrapher_model::{Category, EmployerColumn, Issue, PositionRecord, ValidationReport};

/// Builds the report: issues queued during assembly first, then every check.
pub fn validate(
    positions: &[PositionRecord],
    employers: &[EmployerColumn],
    queued: Vec<Issue>,
) -> ValidationReport {
    let mut report = ValidationReport::new(queued);
    for issue in checks::run_all(positions, employers) {
        debug!(code = issue.code(), message = %issue, "validation issue");
        report.add(issue);
    }
    info!(
        position_count = positions.len(),
        issue_count = report.len(),
        assembly = report.count_in(Category::Assembly),
        range = report.count_in(Category::Range),
        coverage = report.count_in(Category::Coverage),
        "validation complete"
    );
    report
}
