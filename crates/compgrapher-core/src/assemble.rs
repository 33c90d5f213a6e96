//! Position assembly: high/low row pairs → position records.
//!
//! Data rows alternate: the first row of each pair holds the high bounds and
//! carries the position title, the second holds the low bounds and usually
//! leaves the title blank.

use std::collections::BTreeMap;

use tracing::debug;

use compgrapher_model::{
    Cell, EmployerColumn, Issue, PositionRecord, RawRow, SalaryRange, normalize_key,
};

use crate::error::{CoreError, Result};

static EMPTY_CELL: Cell = Cell::Empty;

/// One high row and the low row that follows it.
#[derive(Debug, Clone, Copy)]
pub struct RowPair<'a> {
    pub high: &'a RawRow,
    pub low: &'a RawRow,
}

impl<'a> RowPair<'a> {
    /// Position title, taken from the high row.
    pub fn title(&self) -> Result<&'a str> {
        self.high
            .title
            .as_deref()
            .ok_or_else(|| CoreError::MisalignedData {
                line: self.high.line,
                reason: "high row has no position title".to_string(),
            })
    }
}

/// Splits rows into high/low pairs; an unpaired trailing row is an error.
pub fn pair_rows(rows: &[RawRow]) -> Result<Vec<RowPair<'_>>> {
    let chunks = rows.chunks_exact(2);
    if let [trailing] = chunks.remainder() {
        let reason = match &trailing.title {
            Some(title) => format!("trailing high row '{title}' has no low row"),
            None => "trailing row has no low row to pair with".to_string(),
        };
        return Err(CoreError::MisalignedData {
            line: trailing.line,
            reason,
        });
    }
    Ok(chunks
        .map(|pair| RowPair {
            high: &pair[0],
            low: &pair[1],
        })
        .collect())
}

/// Positions in input order plus the issues found while building them.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub positions: Vec<PositionRecord>,
    pub issues: Vec<Issue>,
}

/// Assembles one position record per row pair.
///
/// A later pair reusing a title replaces the earlier record in place.
pub fn assemble_positions(rows: &[RawRow], employers: &[EmployerColumn]) -> Result<Assembly> {
    let pairs = pair_rows(rows)?;
    let mut assembly = Assembly::default();
    let mut slots: BTreeMap<String, usize> = BTreeMap::new();

    for pair in pairs {
        let title = pair.title()?;
        let mut pair_issues = Vec::new();
        if let Some(found) = pair.low.title.as_deref()
            && normalize_key(found) != normalize_key(title)
        {
            pair_issues.push(Issue::TitleMismatch {
                position: title.to_string(),
                found: found.to_string(),
                line: pair.low.line,
            });
        }

        let record = build_record(title, &pair, employers, &mut pair_issues);
        let key = normalize_key(title);
        match slots.get(&key) {
            Some(&slot) => {
                debug!(position = %title, line = pair.high.line, "duplicate position replaced");
                // Issues of the replaced record no longer describe any output.
                assembly
                    .issues
                    .retain(|issue| issue.position().is_none_or(|p| normalize_key(p) != key));
                assembly.issues.extend(pair_issues);
                assembly.issues.push(Issue::DuplicatePosition {
                    position: title.to_string(),
                });
                assembly.positions[slot] = record;
            }
            None => {
                slots.insert(key, assembly.positions.len());
                assembly.issues.extend(pair_issues);
                assembly.positions.push(record);
            }
        }
    }

    debug!(
        pair_count = rows.len() / 2,
        position_count = assembly.positions.len(),
        issue_count = assembly.issues.len(),
        "positions assembled"
    );
    Ok(assembly)
}

fn build_record(
    title: &str,
    pair: &RowPair<'_>,
    employers: &[EmployerColumn],
    issues: &mut Vec<Issue>,
) -> PositionRecord {
    let mut record = PositionRecord::new(title);
    for (column, employer) in employers.iter().enumerate() {
        let high = pair.high.cells.get(column).unwrap_or(&EMPTY_CELL);
        let low = pair.low.cells.get(column).unwrap_or(&EMPTY_CELL);
        if let (Some(high), Some(low)) = (high.as_number(), low.as_number()) {
            record.ranges.insert(employer.key.clone(), SalaryRange::new(low, high));
            continue;
        }
        let (line, invalid) = match (high, low) {
            (Cell::Invalid(text), _) => (pair.high.line, Some(text.clone())),
            (_, Cell::Invalid(text)) => (pair.low.line, Some(text.clone())),
            (Cell::Empty, _) => (pair.high.line, None),
            _ => (pair.low.line, None),
        };
        issues.push(Issue::MissingValue {
            position: title.to_string(),
            employer: employer.name.clone(),
            line,
            invalid,
        });
    }
    record
}
