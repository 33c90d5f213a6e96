//! Negative compensation checks.
//!
//! Inverted ranges are left to the range check so that each bad range gets
//! exactly one warning.

use compgrapher_model::{EmployerColumn, Issue, PositionRecord};

use super::ranges_in_column_order;

pub fn check(positions: &[PositionRecord], employers: &[EmployerColumn]) -> Vec<Issue> {
    positions
        .iter()
        .flat_map(|position| {
            ranges_in_column_order(position, employers)
                .filter(|(_, range)| range.has_negative() && !range.is_inverted())
                .map(|(employer, range)| Issue::NegativeValue {
                    position: position.title.clone(),
                    employer: employer.name.clone(),
                    low: range.low,
                    high: range.high,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compgrapher_model::SalaryRange;

    #[test]
    fn negative_low_bound() {
        let employers = vec![EmployerColumn::new("A", 1)];
        let positions =
            vec![PositionRecord::new("Intern").with_range("a", SalaryRange::new(-5.0, 50.0))];
        let issues = check(&positions, &employers);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message().contains("negative"));
    }

    #[test]
    fn inverted_negative_range_is_left_to_range_check() {
        let employers = vec![EmployerColumn::new("A", 1)];
        let positions =
            vec![PositionRecord::new("Intern").with_range("a", SalaryRange::new(10.0, -5.0))];
        assert!(check(&positions, &employers).is_empty());
    }
}
