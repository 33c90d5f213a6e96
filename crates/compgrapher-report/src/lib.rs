//! Rendering for prepared compensation datasets.
//!
//! This crate turns a [`PreparedDataset`] into output artifacts:
//!
//! - **SVG**: floating bar chart, one group per position
//! - **HTML**: report with the embedded chart, tables, and warnings
//! - **JSON**: the prepared dataset itself
//! - **CSV**: per-position statistics
//! - **PNG/JPG**: the SVG chart rasterized (`raster` feature)
//!
//! Per-employer charts and an index page linking them can be written
//! alongside the comparison.
//!
//! Rendering reads the dataset only; it never reruns preparation.
//!
//! [`PreparedDataset`]: compgrapher_model::PreparedDataset

pub mod difference;
pub mod employer;
pub mod error;
pub mod format;
pub mod html;
pub mod layout;
pub mod output;
#[cfg(feature = "raster")]
pub mod raster;
pub mod svg;
pub mod table;

pub use difference::{Difference, difference_analysis};
pub use employer::{
    EmployerEntry, EmployerView, employer_views, render_employer_html, render_employer_svg,
    render_employers_index,
};
pub use error::{ReportError, Result};
pub use html::render_html;
pub use layout::{ValueAxis, chart_order};
pub use output::{
    OutputKind, WrittenOutput, output_path, output_stem, plan_outputs, render, write_outputs,
};
#[cfg(feature = "raster")]
pub use raster::{render_jpg, render_png};
pub use svg::{employer_colors, render_svg, render_svg_fragment};
pub use table::{render_json, render_stats_csv};
