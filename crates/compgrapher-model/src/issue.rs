//! Data-quality issue types.
//!
//! Issues never stop the pipeline. Each variant carries only the data its
//! message needs; employer fields hold display names, not lookup keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue category, used for grouping in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Row pairing and cell quality found while assembling positions.
    Assembly,
    /// Salary range sanity (inverted or negative bounds).
    Range,
    /// Employer and position coverage.
    Coverage,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Assembly => "Assembly",
            Self::Range => "Range",
            Self::Coverage => "Coverage",
        }
    }
}

/// A single data-quality warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    // Assembly
    /// High or low cell was empty or non-numeric; the range was omitted.
    MissingValue {
        position: String,
        employer: String,
        line: usize,
        /// Offending text when the cell was non-numeric, `None` when blank.
        invalid: Option<String>,
    },
    /// Low row carried its own title that disagrees with the high row.
    TitleMismatch {
        position: String,
        found: String,
        line: usize,
    },
    /// A later pair reused an existing position title.
    DuplicatePosition { position: String },

    // Range
    /// `low > high`.
    InvertedRange {
        position: String,
        employer: String,
        low: f64,
        high: f64,
    },
    /// Either bound below zero.
    NegativeValue {
        position: String,
        employer: String,
        low: f64,
        high: f64,
    },

    // Coverage
    /// Employer column without a single range in the dataset.
    EmployerWithoutData { employer: String },
    /// Fewer than two employers have data for a position.
    InsufficientComparison {
        position: String,
        employer_count: usize,
    },
}

impl Issue {
    /// Stable short code for tables and machine consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::MissingValue { .. } => "CG101",
            Issue::TitleMismatch { .. } => "CG102",
            Issue::DuplicatePosition { .. } => "CG103",
            Issue::InvertedRange { .. } => "CG201",
            Issue::NegativeValue { .. } => "CG202",
            Issue::EmployerWithoutData { .. } => "CG301",
            Issue::InsufficientComparison { .. } => "CG302",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Issue::MissingValue { .. }
            | Issue::TitleMismatch { .. }
            | Issue::DuplicatePosition { .. } => Category::Assembly,
            Issue::InvertedRange { .. } | Issue::NegativeValue { .. } => Category::Range,
            Issue::EmployerWithoutData { .. } | Issue::InsufficientComparison { .. } => {
                Category::Coverage
            }
        }
    }

    /// Position the issue refers to, if any.
    pub fn position(&self) -> Option<&str> {
        match self {
            Issue::MissingValue { position, .. }
            | Issue::TitleMismatch { position, .. }
            | Issue::DuplicatePosition { position }
            | Issue::InvertedRange { position, .. }
            | Issue::NegativeValue { position, .. }
            | Issue::InsufficientComparison { position, .. } => Some(position),
            Issue::EmployerWithoutData { .. } => None,
        }
    }

    /// Employer the issue refers to, if any.
    pub fn employer(&self) -> Option<&str> {
        match self {
            Issue::MissingValue { employer, .. }
            | Issue::InvertedRange { employer, .. }
            | Issue::NegativeValue { employer, .. }
            | Issue::EmployerWithoutData { employer } => Some(employer),
            Issue::TitleMismatch { .. }
            | Issue::DuplicatePosition { .. }
            | Issue::InsufficientComparison { .. } => None,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            Issue::MissingValue {
                position,
                employer,
                line,
                invalid: Some(text),
            } => format!(
                "Non-numeric value '{text}' for {employer} at position '{position}' (row {line}); range omitted"
            ),
            Issue::MissingValue {
                position,
                employer,
                line,
                invalid: None,
            } => format!(
                "Missing value for {employer} at position '{position}' (row {line}); range omitted"
            ),
            Issue::TitleMismatch {
                position,
                found,
                line,
            } => format!(
                "Low row {line} is titled '{found}' but pairs with position '{position}'; keeping '{position}'"
            ),
            Issue::DuplicatePosition { position } => format!(
                "Duplicate position title '{position}'; the later rows replace the earlier record"
            ),
            Issue::InvertedRange {
                position,
                employer,
                low,
                high,
            } => format!(
                "Low value {low} exceeds high value {high} for {employer} at position '{position}' (negative range)"
            ),
            Issue::NegativeValue {
                position,
                employer,
                low,
                high,
            } => format!(
                "{employer} at position '{position}' has a negative compensation value (low {low}, high {high})"
            ),
            Issue::EmployerWithoutData { employer } => format!("no data for employer {employer}"),
            Issue::InsufficientComparison {
                position,
                employer_count,
            } => format!(
                "insufficient comparison data for position '{position}': {employer_count} employer(s) with data"
            ),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Ordered collection of issues from one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Human-readable warning strings in report order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(Issue::message).collect()
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.category() == category)
            .count()
    }
}
