//! Per-position summary statistics.

use compgrapher_model::{AggregateStats, AggregationGap, PositionRecord};
use tracing::debug;

use crate::error::InsufficientData;

/// Statistics over the combined low/high sample of one position.
pub fn aggregate_position(
    position: &PositionRecord,
) -> std::result::Result<AggregateStats, InsufficientData> {
    let mut sample = position.sample();
    if sample.is_empty() {
        return Err(InsufficientData {
            position: position.title.clone(),
        });
    }
    sample.sort_by(f64::total_cmp);

    let count = sample.len();
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (sample[mid - 1] + sample[mid]) / 2.0
    } else {
        sample[mid]
    };
    let mean = sample.iter().sum::<f64>() / count as f64;
    let min = sample[0];
    let max = sample[count - 1];

    Ok(AggregateStats {
        position: position.title.clone(),
        min,
        max,
        median,
        // Float summation can land a hair outside the sample bounds.
        mean: mean.clamp(min, max),
        sample_size: count,
    })
}

/// Aggregates every position; positions without data become gaps.
pub fn aggregate_positions(
    positions: &[PositionRecord],
) -> (Vec<AggregateStats>, Vec<AggregationGap>) {
    let mut stats = Vec::with_capacity(positions.len());
    let mut gaps = Vec::new();
    for position in positions {
        match aggregate_position(position) {
            Ok(entry) => stats.push(entry),
            Err(err) => {
                debug!(position = %err.position, "position skipped by aggregation");
                gaps.push(AggregationGap {
                    position: err.position.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    (stats, gaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compgrapher_model::SalaryRange;

    #[test]
    fn engineer_example() {
        let engineer = PositionRecord::new("Engineer")
            .with_range("a", SalaryRange::new(80.0, 100.0))
            .with_range("b", SalaryRange::new(75.0, 95.0));
        let stats = aggregate_position(&engineer).unwrap();
        assert_eq!(stats.min, 75.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.mean, 87.5);
        assert_eq!(stats.median, 87.5);
        assert_eq!(stats.sample_size, 4);
    }

    #[test]
    fn negative_values_are_used_literally() {
        let intern = PositionRecord::new("Intern").with_range("a", SalaryRange::new(-5.0, 50.0));
        let stats = aggregate_position(&intern).unwrap();
        assert_eq!(stats.min, -5.0);
        assert_eq!(stats.mean, 22.5);
    }

    #[test]
    fn inverted_range_contributes_both_values() {
        let record = PositionRecord::new("X")
            .with_range("a", SalaryRange::new(1.0, 3.0))
            .with_range("b", SalaryRange::new(10.0, 2.0));
        let stats = aggregate_position(&record).unwrap();
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.max, 10.0);
    }

    #[test]
    fn empty_position_is_a_gap() {
        let positions = vec![
            PositionRecord::new("Vacant"),
            PositionRecord::new("Clerk").with_range("a", SalaryRange::new(1.0, 2.0)),
        ];
        let (stats, gaps) = aggregate_positions(&positions);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].position, "Clerk");
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].position, "Vacant");
        assert!(gaps[0].reason.contains("insufficient data"));
    }
}
