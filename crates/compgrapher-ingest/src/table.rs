//! Raw table loading for delimited text and workbooks.

use std::path::Path;

use csv::ReaderBuilder;

use compgrapher_model::InputFormat;

use crate::clean::normalize_cell;
use crate::error::{IngestError, Result};

/// A row of raw cell text with its 1-based source row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line: usize,
    pub cells: Vec<String>,
}

/// Header plus data rows, every row padded to the header width.
///
/// Blank rows are dropped only before the first data row and after the last
/// one. Between them a blank row is data: it is the low row of a position
/// with no salaries, and dropping it would shift every later pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<SourceRow>,
}

impl SourceRow {
    /// Every cell, title included, is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|value| value.trim().is_empty())
    }
}

impl SourceTable {
    /// Splits raw rows into header and data.
    fn from_raw_rows(path: &Path, raw_rows: Vec<SourceRow>) -> Result<Self> {
        let mut raw_rows = raw_rows.into_iter().skip_while(SourceRow::is_blank);
        let Some(header) = raw_rows.next() else {
            return Err(IngestError::NoHeader {
                path: path.to_path_buf(),
            });
        };
        let width = header.cells.len();
        let mut rows: Vec<SourceRow> = raw_rows.skip_while(SourceRow::is_blank).collect();
        rows.truncate(data_len(&rows));
        for row in &mut rows {
            row.cells.resize(width, String::new());
        }
        Ok(Self {
            headers: header.cells,
            rows,
        })
    }
}

/// Number of rows left once trailing blank rows are trimmed.
///
/// When the last non-blank row would be left unpaired, the blank row after
/// it is kept as its low row.
fn data_len(rows: &[SourceRow]) -> usize {
    let Some(last) = rows.iter().rposition(|row| !row.is_blank()) else {
        return 0;
    };
    let len = last + 1;
    if len % 2 == 1 && rows.len() > len {
        len + 1
    } else {
        len
    }
}

/// Reads a table from in-memory bytes in the given format.
pub fn read_table(path: &Path, format: InputFormat, bytes: &[u8]) -> Result<SourceTable> {
    let raw_rows = match format {
        InputFormat::Csv => read_delimited(path, bytes, b',')?,
        InputFormat::Tsv => read_delimited(path, bytes, b'\t')?,
        InputFormat::Xlsx | InputFormat::Xls | InputFormat::Ods => {
            read_workbook(path, format, bytes)?
        }
    };
    SourceTable::from_raw_rows(path, raw_rows)
}

fn read_delimited(path: &Path, bytes: &[u8], delimiter: u8) -> Result<Vec<SourceRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record
            .position()
            .and_then(|pos| usize::try_from(pos.line()).ok())
            .unwrap_or(idx + 1);
        rows.push(SourceRow {
            line,
            cells: record.iter().map(normalize_cell).collect(),
        });
    }
    Ok(rows)
}

#[cfg(feature = "excel")]
fn read_workbook(path: &Path, _format: InputFormat, bytes: &[u8]) -> Result<Vec<SourceRow>> {
    use std::io::Cursor;

    use calamine::{Data, Reader, open_workbook_auto_from_rs};

    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| workbook_error("workbook has no worksheets".to_string()))?
        .map_err(|e| workbook_error(e.to_string()))?;

    // Ranges start at the first used cell. The leftmost used column is the
    // title column; row numbers stay those of the sheet.
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let rows = range
        .rows()
        .enumerate()
        .map(|(idx, cells)| SourceRow {
            line: first_row + idx + 1,
            cells: cells
                .iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::Float(value) => format_float(*value),
                    other => normalize_cell(&other.to_string()),
                })
                .collect(),
        })
        .collect();
    Ok(rows)
}

#[cfg(not(feature = "excel"))]
fn read_workbook(path: &Path, format: InputFormat, _bytes: &[u8]) -> Result<Vec<SourceRow>> {
    Err(IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: format.label().to_ascii_lowercase(),
        expected: crate::format::SUPPORTED_EXTENSIONS,
    })
}

/// Renders workbook floats without a trailing `.0` for whole numbers.
#[cfg(feature = "excel")]
fn format_float(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
