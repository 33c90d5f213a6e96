//! Input format detection by file extension.

use std::path::Path;

use compgrapher_model::InputFormat;

use crate::error::{IngestError, Result};

/// Extensions accepted by this build, for error messages.
#[cfg(feature = "excel")]
pub const SUPPORTED_EXTENSIONS: &str = ".csv, .tsv, .tab, .xlsx, .xlsm, .xls, .ods";
#[cfg(not(feature = "excel"))]
pub const SUPPORTED_EXTENSIONS: &str = ".csv, .tsv, .tab";

/// Determines the declared format of `path` from its extension.
pub fn detect_format(path: &Path) -> Result<InputFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let unsupported = || IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: extension.to_string(),
        expected: SUPPORTED_EXTENSIONS,
    };
    let format = InputFormat::from_extension(extension).ok_or_else(unsupported)?;
    if !format.is_delimited() && !cfg!(feature = "excel") {
        return Err(unsupported());
    }
    Ok(format)
}
