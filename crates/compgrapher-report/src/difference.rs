//! Midpoint differences between the highlighted employer and the others.

use serde::Serialize;

use compgrapher_model::PreparedDataset;

use crate::layout::chart_order;

/// One comparison row: another employer against the highlighted one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub position: String,
    pub employer: String,
    pub highlighted_midpoint: f64,
    pub employer_midpoint: f64,
    /// `employer_midpoint - highlighted_midpoint`.
    pub difference: f64,
    /// Difference relative to the highlighted midpoint; `None` when that
    /// midpoint is not positive.
    pub percent: Option<f64>,
}

/// Differences for every position where both employers have a range, in
/// chart order then employer column order.
pub fn difference_analysis(dataset: &PreparedDataset) -> Vec<Difference> {
    let highlighted = &dataset.highlighted;
    let mut rows = Vec::new();
    for position in chart_order(dataset) {
        let Some(base) = position.range_for(&highlighted.key) else {
            continue;
        };
        let base_mid = base.midpoint();
        for employer in dataset.comparison_employers() {
            let Some(range) = position.range_for(&employer.key) else {
                continue;
            };
            let difference = range.midpoint() - base_mid;
            rows.push(Difference {
                position: position.title.clone(),
                employer: employer.name.clone(),
                highlighted_midpoint: base_mid,
                employer_midpoint: range.midpoint(),
                difference,
                percent: (base_mid > 0.0).then(|| difference / base_mid * 100.0),
            });
        }
    }
    rows
}
