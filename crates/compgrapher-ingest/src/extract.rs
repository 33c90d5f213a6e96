//! Row extraction: raw table → employer columns and cleaned rows.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use sha2::Digest;
use tracing::{debug, info};

use compgrapher_model::{
    EmployerColumn, InputFormat, RawRow, SourceInfo, normalize_key, normalize_label,
};

use crate::clean::clean_salary;
use crate::error::{IngestError, Result};
use crate::format::detect_format;
use crate::table::{SourceTable, read_table};

/// Output of the row extractor.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub source: SourceInfo,
    /// Employer columns in source order, bad columns excluded.
    pub employers: Vec<EmployerColumn>,
    /// Data rows in file order.
    pub rows: Vec<RawRow>,
}

/// Hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Reads `path` and produces employer columns plus cleaned rows.
///
/// `bad_columns` holds normalized header keys (see [`normalize_key`]) that
/// are never treated as employers. The first column is always the title
/// column.
pub fn extract_rows(path: &Path, bad_columns: &BTreeSet<String>) -> Result<Extraction> {
    let format = detect_format(path)?;
    let bytes = fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let table = read_table(path, format, &bytes)?;
    let employers = employer_columns(path, &table.headers, bad_columns)?;
    let rows = raw_rows(&table, &employers);

    if rows.is_empty() {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
            reason: "no data rows after filtering".to_string(),
        });
    }

    info!(
        path = %path.display(),
        format = %format,
        employer_count = employers.len(),
        row_count = rows.len(),
        "extracted rows"
    );

    Ok(Extraction {
        source: source_info(path, format, &bytes, rows.len()),
        employers,
        rows,
    })
}

fn source_info(path: &Path, format: InputFormat, bytes: &[u8], data_rows: usize) -> SourceInfo {
    SourceInfo {
        path: path.to_path_buf(),
        format,
        sha256: sha256_hex(bytes),
        data_rows,
    }
}

/// Maps headers (title column excluded) to employer columns.
pub fn employer_columns(
    path: &Path,
    headers: &[String],
    bad_columns: &BTreeSet<String>,
) -> Result<Vec<EmployerColumn>> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut employers = Vec::new();
    for (index, header) in headers.iter().enumerate().skip(1) {
        let key = normalize_key(header);
        if key.is_empty() {
            debug!(column = index, "skipping column with empty header");
            continue;
        }
        if bad_columns.contains(&key) {
            debug!(column = index, header = %header, "skipping bad column");
            continue;
        }
        if let Some(first) = seen.insert(key, index) {
            return Err(IngestError::DuplicateEmployer {
                path: path.to_path_buf(),
                name: normalize_label(header),
                first_column: first + 1,
                second_column: index + 1,
            });
        }
        employers.push(EmployerColumn::new(header, index));
    }
    if employers.is_empty() {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
            reason: "no employer columns after filtering".to_string(),
        });
    }
    Ok(employers)
}

fn raw_rows(table: &SourceTable, employers: &[EmployerColumn]) -> Vec<RawRow> {
    table
        .rows
        .iter()
        .map(|row| {
            let title = row
                .cells
                .first()
                .map(|cell| normalize_label(cell))
                .filter(|title| !title.is_empty());
            let cells = employers
                .iter()
                .map(|employer| {
                    let raw = row.cells.get(employer.index).map_or("", String::as_str);
                    clean_salary(raw)
                })
                .collect();
            RawRow::new(row.line, title, cells)
        })
        .collect()
}
