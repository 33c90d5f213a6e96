//! Employer coverage checks.

use compgrapher_model::{EmployerColumn, Issue, PositionRecord};

/// Employers without a single salary range across the dataset.
pub fn check(positions: &[PositionRecord], employers: &[EmployerColumn]) -> Vec<Issue> {
    employers
        .iter()
        .filter(|employer| {
            !positions
                .iter()
                .any(|position| position.range_for(&employer.key).is_some())
        })
        .map(|employer| Issue::EmployerWithoutData {
            employer: employer.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compgrapher_model::SalaryRange;

    #[test]
    fn reports_employer_without_any_range() {
        let employers = vec![EmployerColumn::new("A", 1), EmployerColumn::new("C", 2)];
        let positions =
            vec![PositionRecord::new("Clerk").with_range("a", SalaryRange::new(1.0, 2.0))];
        let issues = check(&positions, &employers);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message(), "no data for employer C");
    }
}
