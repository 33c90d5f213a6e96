//! Error types for rendering and output.

use std::path::PathBuf;

use thiserror::Error;

use compgrapher_model::OutputFormat;

/// Errors raised while rendering or writing outputs.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Format name is known but this build has no writer for it.
    #[error("output format '{0}' is not supported by this build")]
    UnsupportedFormat(OutputFormat),

    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SVG generation failed.
    #[error("failed to render SVG: {0}")]
    Svg(String),

    /// Rasterizing the chart to PNG or JPG failed.
    #[error("failed to rasterize chart: {0}")]
    Raster(String),

    /// HTML generation failed.
    #[error("failed to render HTML: {0}")]
    Html(#[from] std::fmt::Error),

    /// JSON serialization failed.
    #[error("failed to serialize dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV generation failed.
    #[error("failed to render CSV: {0}")]
    Csv(String),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
