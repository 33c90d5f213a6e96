//! The prepared dataset handed to renderers.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::issue::ValidationReport;
use crate::record::{EmployerColumn, PositionRecord};
use crate::stats::{AggregateStats, AggregationGap};

/// Source table formats, declared by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Tsv,
    Xlsx,
    Xls,
    Ods,
}

impl InputFormat {
    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }

    /// Delimited text rather than a workbook.
    pub fn is_delimited(&self) -> bool {
        matches!(self, Self::Csv | Self::Tsv)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Tsv => "TSV",
            Self::Xlsx => "XLSX",
            Self::Xls => "XLS",
            Self::Ods => "ODS",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Provenance of the loaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: PathBuf,
    pub format: InputFormat,
    /// Hex SHA-256 of the source bytes.
    pub sha256: String,
    /// Data rows read after the header, blank rows excluded.
    pub data_rows: usize,
}

impl SourceInfo {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
            .to_string()
    }
}

/// Validated, aggregated data model for one pipeline run.
///
/// Built once by the pipeline entry point and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedDataset {
    pub source: SourceInfo,
    /// Employer columns in source order.
    pub employers: Vec<EmployerColumn>,
    pub highlighted: EmployerColumn,
    /// Position records in input order.
    pub positions: Vec<PositionRecord>,
    /// Statistics for every position with at least one value, input order.
    pub stats: Vec<AggregateStats>,
    /// Positions skipped by aggregation.
    pub gaps: Vec<AggregationGap>,
    pub report: ValidationReport,
}

impl PreparedDataset {
    /// Display name for an employer key, falling back to the key itself.
    pub fn employer_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.employers
            .iter()
            .find(|employer| employer.key == key)
            .map(|employer| employer.name.as_str())
            .unwrap_or(key)
    }

    pub fn stats_for(&self, position: &str) -> Option<&AggregateStats> {
        self.stats.iter().find(|stats| stats.position == position)
    }

    /// Employers other than the highlighted one, in source order.
    pub fn comparison_employers(&self) -> impl Iterator<Item = &EmployerColumn> {
        self.employers
            .iter()
            .filter(move |employer| employer.key != self.highlighted.key)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.report.messages()
    }

    pub fn has_warnings(&self) -> bool {
        !self.report.is_empty()
    }
}
