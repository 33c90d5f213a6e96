use serde::{Deserialize, Serialize};

/// Summary statistics for one position over the combined low/high sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub position: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub mean: f64,
    /// Number of values in the combined sample (two per employer).
    pub sample_size: usize,
}

/// A position left out of aggregation because it had no contributing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationGap {
    pub position: String,
    pub reason: String,
}
