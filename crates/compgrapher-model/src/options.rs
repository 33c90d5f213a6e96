//! Configuration handed to the pipeline and the renderers.
//!
//! Every field has a default so partial configuration files deserialize;
//! nothing here is process-global.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::record::normalize_key;

/// Summary columns that carry no employer data.
pub const DEFAULT_BAD_COLUMNS: &[&str] = &[
    "ERI",
    "Comp Data Points",
    "60th Percentile",
    "Comp Average",
];

/// Categorical palette for non-highlighted employers.
const DEFAULT_PALETTE: &[&str] = &[
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#9467bd", "#c5b0d5",
    "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7", "#bcbd22", "#dbdb8d",
    "#17becf", "#9edae5",
];

/// Output artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Html,
    Json,
    Csv,
    Png,
    Jpg,
    Pdf,
}

impl OutputFormat {
    /// Formats rasterized from the SVG chart.
    pub const RASTER: [OutputFormat; 2] = [OutputFormat::Png, OutputFormat::Jpg];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
        }
    }

    /// Whether this build can write the format. PNG and JPG need the
    /// `raster` feature; PDF is never written.
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Svg | Self::Html | Self::Json | Self::Csv => true,
            Self::Png | Self::Jpg => cfg!(feature = "raster"),
            Self::Pdf => false,
        }
    }

    /// Formats that carry a chart and can be drawn per employer.
    pub fn is_chart(&self) -> bool {
        matches!(self, Self::Svg | Self::Html | Self::Png | Self::Jpg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "pdf" => Ok(Self::Pdf),
            other => Err(ConfigError::UnknownOutputFormat(other.to_string())),
        }
    }
}

/// Where and what to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub dir: PathBuf,
    pub formats: Vec<OutputFormat>,
    /// Also write one chart per employer plus an index page linking them.
    pub per_employer: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            formats: vec![OutputFormat::Svg, OutputFormat::Html],
            per_employer: false,
        }
    }
}

/// Cosmetic chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Fill for the highlighted employer's bars.
    pub highlight_color: String,
    /// Fills for the remaining employers, cycled in column order.
    pub palette: Vec<String>,
    pub show_grid: bool,
    /// Draw low/high value labels next to each bar.
    pub show_labels: bool,
    /// Chart width in pixels.
    pub width: u32,
    /// Vertical space per position group in pixels.
    pub row_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight_color: "#d62728".to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            show_grid: true,
            show_labels: true,
            width: 1200,
            row_height: 48,
        }
    }
}

impl RenderOptions {
    /// Color for the n-th non-highlighted employer.
    pub fn palette_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return "#7f7f7f";
        }
        &self.palette[index % self.palette.len()]
    }
}

/// Explicit configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input used when none is given on the command line.
    pub input_path: Option<PathBuf>,
    /// Column headers excluded from the employer set (normalized exact match).
    pub bad_columns: Vec<String>,
    /// Employer to emphasize; defaults to the first employer column.
    pub highlighted_employer: Option<String>,
    /// Position titles removed before validation (normalized exact match).
    pub exclude_positions: Vec<String>,
    /// Number of highest-paid positions removed before validation.
    pub drop_top_paid: usize,
    pub output: OutputOptions,
    pub render: RenderOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            bad_columns: DEFAULT_BAD_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            highlighted_employer: None,
            exclude_positions: Vec::new(),
            drop_top_paid: 0,
            output: OutputOptions::default(),
            render: RenderOptions::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_highlighted_employer(mut self, employer: impl Into<String>) -> Self {
        self.highlighted_employer = Some(employer.into());
        self
    }

    pub fn with_bad_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bad_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded_positions<I, S>(mut self, positions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_positions = positions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_drop_top_paid(mut self, count: usize) -> Self {
        self.drop_top_paid = count;
        self
    }

    /// Normalized bad-column keys.
    pub fn bad_column_keys(&self) -> BTreeSet<String> {
        self.bad_columns.iter().map(|c| normalize_key(c)).collect()
    }

    /// Normalized excluded-position keys.
    pub fn excluded_position_keys(&self) -> BTreeSet<String> {
        self.exclude_positions
            .iter()
            .map(|p| normalize_key(p))
            .collect()
    }

    /// Check output and render settings before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.output.formats.is_empty() {
            return Err(ConfigError::NoOutputFormats);
        }
        if let Some(format) = self.output.formats.iter().find(|f| !f.is_supported()) {
            return Err(ConfigError::UnsupportedOutputFormat(*format));
        }
        check_color("render.highlight_color", &self.render.highlight_color)?;
        for (idx, color) in self.render.palette.iter().enumerate() {
            check_color(&format!("render.palette[{idx}]"), color)?;
        }
        if self.render.width == 0 {
            return Err(ConfigError::ZeroDimension {
                field: "render.width",
            });
        }
        if self.render.row_height == 0 {
            return Err(ConfigError::ZeroDimension {
                field: "render.row_height",
            });
        }
        Ok(())
    }
}

fn check_color(field: &str, value: &str) -> Result<()> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|ch| ch.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidColor {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.bad_column_keys().contains("comp data points"));
        assert!(config.render.show_grid);
        assert_eq!(config.output.dir, PathBuf::from("output"));
    }

    #[test]
    fn pdf_is_rejected() {
        let mut config = PipelineConfig::default();
        config.output.formats = vec![OutputFormat::Svg, OutputFormat::Pdf];
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedOutputFormat(OutputFormat::Pdf))
        );
    }

    #[test]
    fn raster_support_follows_feature() {
        let mut config = PipelineConfig::default();
        config.output.formats = vec![OutputFormat::Png, OutputFormat::Jpg];
        if cfg!(feature = "raster") {
            assert_eq!(config.validate(), Ok(()));
        } else {
            assert_eq!(
                config.validate(),
                Err(ConfigError::UnsupportedOutputFormat(OutputFormat::Png))
            );
        }
    }

    #[test]
    fn bad_color_is_rejected() {
        let mut config = PipelineConfig::default();
        config.render.highlight_color = "red".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidColor { .. })
        ));
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("JPEG".parse::<OutputFormat>(), Ok(OutputFormat::Jpg));
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            highlighted_employer = "Dartmouth"
            bad_columns = ["ERI"]

            [render]
            show_labels = true
            "#,
        )
        .expect("parse config");
        assert_eq!(config.highlighted_employer.as_deref(), Some("Dartmouth"));
        assert_eq!(config.bad_columns, vec!["ERI".to_string()]);
        assert!(config.render.show_labels);
        assert!(config.render.show_grid);
        assert_eq!(config.output.formats, vec![OutputFormat::Svg, OutputFormat::Html]);
    }
}
