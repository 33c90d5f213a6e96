//! Position ordering and the value axis.

use compgrapher_model::{PositionRecord, PreparedDataset};

/// Positions in chart order.
///
/// Positions where the highlighted employer has a range come first, sorted
/// by its midpoint ascending; the rest follow in input order.
pub fn chart_order(dataset: &PreparedDataset) -> Vec<&PositionRecord> {
    let key = &dataset.highlighted.key;
    let (mut with_highlight, without): (Vec<_>, Vec<_>) = dataset
        .positions
        .iter()
        .partition(|position| position.range_for(key).is_some());
    with_highlight.sort_by(|a, b| {
        let a = a.range_for(key).map_or(0.0, |range| range.midpoint());
        let b = b.range_for(key).map_or(0.0, |range| range.midpoint());
        a.total_cmp(&b)
    });
    with_highlight.extend(without);
    with_highlight
}

/// Linear value axis with "nice" tick spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ValueAxis {
    /// Axis covering every bound in the dataset, always including zero.
    pub fn for_dataset(dataset: &PreparedDataset) -> Self {
        let values = dataset.positions.iter().flat_map(PositionRecord::sample);
        let (low, high) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self::covering(low, high)
    }

    pub fn covering(low: f64, high: f64) -> Self {
        let high = if high <= low { low + 1.0 } else { high };
        let step = nice_step((high - low) / 5.0);
        Self {
            min: (low / step).floor() * step,
            max: (high / step).ceil() * step,
            step,
        }
    }

    pub fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count)
            .map(|idx| self.min + self.step * idx as f64)
            .collect()
    }

    /// Maps a value onto `[0, length]`.
    pub fn scale(&self, value: f64, length: f64) -> f64 {
        (value - self.min) / (self.max - self.min) * length
    }
}

/// Rounds a raw step up to 1, 2, 5, or 10 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
