//! Row extraction for compensation tables.
//!
//! Reads a CSV, TSV, or workbook (with the `excel` feature), recognizes the
//! employer columns, and cleans every salary cell. Pairing rows into
//! positions happens downstream.

pub mod clean;
pub mod error;
pub mod extract;
pub mod format;
pub mod table;

pub use clean::{clean_salary, normalize_cell};
pub use error::{IngestError, Result};
pub use extract::{Extraction, employer_columns, extract_rows, sha256_hex};
pub use format::{SUPPORTED_EXTENSIONS, detect_format};
pub use table::{SourceRow, SourceTable, read_table};
