//! Salary cell cleaning.

use std::sync::LazyLock;

use regex::Regex;

use compgrapher_model::Cell;

/// First number in rate text such as "45 per inspection".
static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("Invalid number regex"));

/// Normalizes a raw cell: trims whitespace and a leading BOM.
pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Converts a raw salary cell into a [`Cell`].
///
/// - blank → `Empty`
/// - `$` and `,` are stripped before parsing
/// - rate text such as `"45 per inspection"` yields its first number
/// - anything else that is not a finite number is `Invalid`
pub fn clean_salary(raw: &str) -> Cell {
    let trimmed = normalize_cell(raw);
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    let stripped: String = trimmed
        .chars()
        .filter(|ch| *ch != '$' && *ch != ',')
        .collect();
    let stripped = stripped.trim();

    if stripped.to_lowercase().contains("per") {
        return FIRST_NUMBER
            .find(stripped)
            .and_then(|m| finite(m.as_str()))
            .map_or_else(|| Cell::Invalid(trimmed.clone()), Cell::Number);
    }

    finite(stripped).map_or(Cell::Invalid(trimmed), Cell::Number)
}

fn finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
