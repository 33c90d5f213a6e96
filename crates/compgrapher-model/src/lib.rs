//! Compensation data model.
//!
//! Types shared by every stage of the pipeline:
//!
//! - **Records**: raw rows, salary ranges, employer columns, position records
//! - **Statistics**: per-position aggregates and aggregation gaps
//! - **Issues**: data-quality warnings collected during assembly and validation
//! - **Options**: the explicit configuration handed to the pipeline entry point
//! - **Dataset**: the immutable prepared dataset consumed by renderers

pub mod dataset;
pub mod error;
pub mod issue;
pub mod options;
pub mod record;
pub mod stats;

pub use dataset::{InputFormat, PreparedDataset, SourceInfo};
pub use error::{ConfigError, Result};
pub use issue::{Category, Issue, ValidationReport};
pub use options::{
    DEFAULT_BAD_COLUMNS, OutputFormat, OutputOptions, PipelineConfig, RenderOptions,
};
pub use record::{
    Cell, EmployerColumn, PositionRecord, RawRow, SalaryRange, normalize_key, normalize_label,
};
pub use stats::{AggregateStats, AggregationGap};
