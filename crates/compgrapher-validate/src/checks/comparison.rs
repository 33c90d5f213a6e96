//! Per-position comparison coverage.

use compgrapher_model::{Issue, PositionRecord};

/// Positions need at least two employers to be compared.
const MIN_EMPLOYERS: usize = 2;

pub fn check(positions: &[PositionRecord]) -> Vec<Issue> {
    positions
        .iter()
        .filter(|position| position.employer_count() < MIN_EMPLOYERS)
        .map(|position| Issue::InsufficientComparison {
            position: position.title.clone(),
            employer_count: position.employer_count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compgrapher_model::SalaryRange;

    #[test]
    fn single_employer_is_insufficient() {
        let positions = vec![
            PositionRecord::new("Clerk").with_range("a", SalaryRange::new(1.0, 2.0)),
            PositionRecord::new("Engineer")
                .with_range("a", SalaryRange::new(1.0, 2.0))
                .with_range("b", SalaryRange::new(1.0, 2.0)),
            PositionRecord::new("Vacant"),
        ];
        let issues = check(&positions);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message().contains("insufficient comparison data"));
        assert_eq!(issues[1].position(), Some("Vacant"));
    }
}
