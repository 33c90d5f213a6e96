//! Delimited and JSON exports.

use csv::Writer;

use compgrapher_model::{AggregateStats, PreparedDataset};

use crate::error::{ReportError, Result};
use crate::format::trim_number;

const STATS_HEADER: [&str; 6] = ["position", "min", "max", "median", "mean", "sample_size"];

/// One CSV row per aggregated position.
pub fn render_stats_csv(stats: &[AggregateStats]) -> Result<String> {
    let csv_error = |err: csv::Error| ReportError::Csv(err.to_string());
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(STATS_HEADER).map_err(csv_error)?;
    for entry in stats {
        writer
            .write_record([
                entry.position.clone(),
                trim_number(entry.min),
                trim_number(entry.max),
                trim_number(entry.median),
                trim_number(entry.mean),
                entry.sample_size.to_string(),
            ])
            .map_err(csv_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Csv(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ReportError::Csv(err.to_string()))
}

/// The whole prepared dataset as pretty-printed JSON.
pub fn render_json(dataset: &PreparedDataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}
