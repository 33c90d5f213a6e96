//! Data-quality checks.
//!
//! Each module inspects the assembled positions independently; every check
//! runs regardless of what the others find.

mod comparison;
mod coverage;
mod negative;
mod range;

use compgrapher_model::{EmployerColumn, Issue, PositionRecord, SalaryRange};

/// Run all checks, in reporting order.
pub fn run_all(positions: &[PositionRecord], employers: &[EmployerColumn]) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. Inverted ranges (low > high)
    issues.extend(range::check(positions, employers));

    // 2. Negative bounds
    issues.extend(negative::check(positions, employers));

    // 3. Employers with no data anywhere
    issues.extend(coverage::check(positions, employers));

    // 4. Positions with fewer than two employers
    issues.extend(comparison::check(positions));

    issues
}

/// Present ranges of a position in employer-column order, with display names.
fn ranges_in_column_order<'a>(
    position: &'a PositionRecord,
    employers: &'a [EmployerColumn],
) -> impl Iterator<Item = (&'a EmployerColumn, &'a SalaryRange)> {
    employers
        .iter()
        .filter_map(|employer| position.range_for(&employer.key).map(|range| (employer, range)))
}
