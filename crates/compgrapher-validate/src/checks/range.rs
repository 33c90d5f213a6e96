//! Inverted range checks.

use compgrapher_model::{EmployerColumn, Issue, PositionRecord};

use super::ranges_in_column_order;

/// One issue per (position, employer) whose low bound exceeds its high bound.
pub fn check(positions: &[PositionRecord], employers: &[EmployerColumn]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for position in positions {
        for (employer, range) in ranges_in_column_order(position, employers) {
            if range.is_inverted() {
                issues.push(Issue::InvertedRange {
                    position: position.title.clone(),
                    employer: employer.name.clone(),
                    low: range.low,
                    high: range.high,
                });
            }
        }
    }
    issues
}
