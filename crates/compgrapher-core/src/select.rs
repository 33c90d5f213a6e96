//! Position selection ahead of validation.

use std::collections::BTreeSet;

use tracing::debug;

use compgrapher_model::{PositionRecord, normalize_key};

/// Positions kept, plus the titles removed and why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub positions: Vec<PositionRecord>,
    /// Titles removed by name.
    pub excluded: Vec<String>,
    /// Titles removed as the highest paid.
    pub dropped: Vec<String>,
}

/// Pay level used to rank positions: mean of the range midpoints.
pub fn pay_level(position: &PositionRecord) -> Option<f64> {
    if position.ranges.is_empty() {
        return None;
    }
    let total: f64 = position.ranges.values().map(|range| range.midpoint()).sum();
    Some(total / position.ranges.len() as f64)
}

/// Removes excluded titles, then the `drop_top_paid` highest-paid positions.
///
/// `excluded` holds normalized title keys. Positions without any range are
/// never ranked. Input order is preserved.
pub fn select_positions(
    positions: Vec<PositionRecord>,
    excluded: &BTreeSet<String>,
    drop_top_paid: usize,
) -> Selection {
    let (excluded_records, mut kept): (Vec<_>, Vec<_>) = positions
        .into_iter()
        .partition(|position| excluded.contains(&normalize_key(&position.title)));

    let mut ranked: Vec<(usize, f64)> = kept
        .iter()
        .enumerate()
        .filter_map(|(idx, position)| pay_level(position).map(|pay| (idx, pay)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let top: BTreeSet<usize> = ranked
        .into_iter()
        .take(drop_top_paid)
        .map(|(idx, _)| idx)
        .collect();

    let mut dropped = Vec::new();
    let mut idx = 0;
    kept.retain(|position| {
        let keep = !top.contains(&idx);
        if !keep {
            dropped.push(position.title.clone());
        }
        idx += 1;
        keep
    });

    let excluded: Vec<String> = excluded_records.into_iter().map(|p| p.title).collect();
    if !excluded.is_empty() || !dropped.is_empty() {
        debug!(?excluded, ?dropped, "positions removed before validation");
    }
    Selection {
        positions: kept,
        excluded,
        dropped,
    }
}
