//! Row, range, and position record types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalizes a header or title into a lookup key.
///
/// Trims (including a leading BOM), collapses internal whitespace runs to a
/// single space, and lowercases, so `" Acme  Town"` and `"ACME TOWN"` share
/// one identity.
pub fn normalize_key(raw: &str) -> String {
    normalize_label(raw).to_lowercase()
}

/// Normalizes a header for display: trimmed with whitespace runs collapsed.
pub fn normalize_label(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut normalized = String::with_capacity(trimmed.len());
    for part in trimmed.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(part);
    }
    normalized
}

/// A single employer cell after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A finite numeric value.
    Number(f64),
    /// Blank in the source.
    Empty,
    /// Text that could not be read as a number.
    Invalid(String),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// One source row: the title cell plus one cell per employer column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based row number in the source, header included.
    pub line: usize,
    /// Position title; `None` marks a continuation of the previous position.
    pub title: Option<String>,
    /// Cells in employer-column order.
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn new(line: usize, title: Option<String>, cells: Vec<Cell>) -> Self {
        Self { line, title, cells }
    }
}

/// A recognized employer data column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerColumn {
    /// Header as displayed (whitespace collapsed).
    pub name: String,
    /// Normalized identity used for lookups.
    pub key: String,
    /// Column index in the source table.
    pub index: usize,
}

impl EmployerColumn {
    pub fn new(name: &str, index: usize) -> Self {
        Self {
            name: normalize_label(name),
            key: normalize_key(name),
            index,
        }
    }

    /// Case- and whitespace-insensitive name comparison.
    pub fn matches(&self, name: &str) -> bool {
        self.key == normalize_key(name)
    }
}

/// Low/high compensation bounds for one employer at one position.
///
/// `low <= high` is expected but not enforced; inverted ranges are reported
/// by validation and kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub low: f64,
    pub high: f64,
}

impl SalaryRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    pub fn has_negative(&self) -> bool {
        self.low < 0.0 || self.high < 0.0
    }
}

/// Salary ranges for one position, keyed by employer key.
///
/// An employer missing from `ranges` supplied no usable data for this
/// position; that is distinct from a zero salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub title: String,
    pub ranges: BTreeMap<String, SalaryRange>,
}

impl PositionRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ranges: BTreeMap::new(),
        }
    }

    pub fn with_range(mut self, employer_key: impl Into<String>, range: SalaryRange) -> Self {
        self.ranges.insert(employer_key.into(), range);
        self
    }

    pub fn range_for(&self, employer_key: &str) -> Option<&SalaryRange> {
        self.ranges.get(employer_key)
    }

    /// Number of employers with data for this position.
    pub fn employer_count(&self) -> usize {
        self.ranges.len()
    }

    /// Every low and high value, two per present employer.
    pub fn sample(&self) -> Vec<f64> {
        self.ranges
            .values()
            .flat_map(|range| [range.low, range.high])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_key("  Acme   Town "), "acme town");
        assert_eq!(normalize_key("\u{feff}ACME TOWN"), "acme town");
        assert_eq!(normalize_label(" Acme \t Town"), "Acme Town");
    }

    #[test]
    fn employer_column_matches_normalized_names() {
        let column = EmployerColumn::new("Employer  A ", 1);
        assert_eq!(column.name, "Employer A");
        assert!(column.matches("employer a"));
        assert!(!column.matches("Employer B"));
    }

    #[test]
    fn position_sample_contains_both_bounds() {
        let record = PositionRecord::new("Engineer")
            .with_range("a", SalaryRange::new(80.0, 100.0))
            .with_range("b", SalaryRange::new(75.0, 95.0));
        let mut sample = record.sample();
        sample.sort_by(f64::total_cmp);
        assert_eq!(sample, vec![75.0, 80.0, 95.0, 100.0]);
    }

    #[test]
    fn range_flags() {
        assert!(SalaryRange::new(100.0, 80.0).is_inverted());
        assert!(SalaryRange::new(-5.0, 50.0).has_negative());
        assert!((SalaryRange::new(80.0, 100.0).midpoint() - 90.0).abs() < 1e-9);
    }
}
