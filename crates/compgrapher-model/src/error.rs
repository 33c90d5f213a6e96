use thiserror::Error;

use crate::options::OutputFormat;

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown output format '{0}' (expected svg, html, json, csv, png, jpg)")]
    UnknownOutputFormat(String),

    #[error("output format '{0}' is recognized but not supported by this build")]
    UnsupportedOutputFormat(OutputFormat),

    #[error("invalid color '{value}' for {field} (expected #rrggbb)")]
    InvalidColor { field: String, value: String },

    #[error("{field} must be greater than zero")]
    ZeroDimension { field: &'static str },

    #[error("at least one output format is required")]
    NoOutputFormats,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
