//! Output file naming and writing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use compgrapher_model::{
    EmployerColumn, OutputFormat, OutputOptions, PreparedDataset, RenderOptions,
};

use crate::employer::{
    EmployerView, INDEX_STEM, employer_views, render_employer_html, render_employer_svg,
    render_employers_index,
};
use crate::error::{ReportError, Result};
use crate::html::render_html;
use crate::svg::render_svg;
use crate::table::{render_json, render_stats_csv};

/// What an output file contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    /// The comparison across all employers.
    Comparison,
    /// One employer's chart, by employer key.
    Employer(String),
    /// Index page linking every employer page.
    EmployerIndex,
}

/// A file written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub format: OutputFormat,
    pub kind: OutputKind,
    pub path: PathBuf,
}

/// Lowercase alphanumeric runs joined by single underscores.
pub(crate) fn slug(text: &str) -> String {
    let mut slug = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}

/// File stem shared by all outputs of one run, e.g. `acme_town_comparison`.
pub fn output_stem(highlighted: &EmployerColumn) -> String {
    let stem = slug(&highlighted.key);
    if stem.is_empty() {
        "comparison".to_string()
    } else {
        format!("{stem}_comparison")
    }
}

/// `<dir>/<format>/<stem>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn output_path(
    dir: &Path,
    format: OutputFormat,
    stem: &str,
    generated_at: NaiveDateTime,
) -> PathBuf {
    dir.join(format.extension())
        .join(output_file_name(format, stem, generated_at))
}

fn output_file_name(format: OutputFormat, stem: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "{stem}_{}.{}",
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Renders one output format of the comparison in memory.
///
/// PNG and JPG are rasterized from the SVG chart.
pub fn render(
    format: OutputFormat,
    dataset: &PreparedDataset,
    options: &RenderOptions,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Svg => render_svg(dataset, options).map(String::into_bytes),
        OutputFormat::Html => render_html(dataset, options, generated_at).map(String::into_bytes),
        OutputFormat::Json => render_json(dataset).map(String::into_bytes),
        OutputFormat::Csv => render_stats_csv(&dataset.stats).map(String::into_bytes),
        OutputFormat::Png | OutputFormat::Jpg => rasterize(format, &render_svg(dataset, options)?),
        OutputFormat::Pdf => Err(ReportError::UnsupportedFormat(format)),
    }
}

#[cfg(feature = "raster")]
fn rasterize(format: OutputFormat, svg: &str) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Jpg => crate::raster::render_jpg(svg),
        _ => crate::raster::render_png(svg),
    }
}

#[cfg(not(feature = "raster"))]
fn rasterize(format: OutputFormat, _svg: &str) -> Result<Vec<u8>> {
    Err(ReportError::UnsupportedFormat(format))
}

fn render_employer(
    format: OutputFormat,
    dataset: &PreparedDataset,
    view: &EmployerView<'_>,
    options: &RenderOptions,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Svg => render_employer_svg(view, options).map(String::into_bytes),
        OutputFormat::Html => {
            let index = output_file_name(OutputFormat::Html, INDEX_STEM, generated_at);
            render_employer_html(dataset, view, options, generated_at, &index)
                .map(String::into_bytes)
        }
        OutputFormat::Png | OutputFormat::Jpg => {
            rasterize(format, &render_employer_svg(view, options)?)
        }
        OutputFormat::Json | OutputFormat::Csv | OutputFormat::Pdf => {
            Err(ReportError::UnsupportedFormat(format))
        }
    }
}

/// Planned output paths, without writing anything.
///
/// With `per_employer` set, every chart format is also planned once per
/// employer with data, and the HTML format adds the index page.
pub fn plan_outputs(
    dataset: &PreparedDataset,
    output: &OutputOptions,
    options: &RenderOptions,
    generated_at: NaiveDateTime,
) -> Result<Vec<WrittenOutput>> {
    if let Some(format) = output.formats.iter().find(|format| !format.is_supported()) {
        return Err(ReportError::UnsupportedFormat(*format));
    }
    let mut formats: Vec<OutputFormat> = Vec::new();
    for format in &output.formats {
        if !formats.contains(format) {
            formats.push(*format);
        }
    }

    let stem = output_stem(&dataset.highlighted);
    let mut planned: Vec<WrittenOutput> = formats
        .iter()
        .map(|format| WrittenOutput {
            format: *format,
            kind: OutputKind::Comparison,
            path: output_path(&output.dir, *format, &stem, generated_at),
        })
        .collect();

    if output.per_employer {
        let chart_formats: Vec<OutputFormat> =
            formats.iter().copied().filter(OutputFormat::is_chart).collect();
        for view in employer_views(dataset, options) {
            for format in &chart_formats {
                planned.push(WrittenOutput {
                    format: *format,
                    kind: OutputKind::Employer(view.employer.key.clone()),
                    path: output_path(&output.dir, *format, &view.stem, generated_at),
                });
            }
        }
        if formats.contains(&OutputFormat::Html) {
            planned.push(WrittenOutput {
                format: OutputFormat::Html,
                kind: OutputKind::EmployerIndex,
                path: output_path(&output.dir, OutputFormat::Html, INDEX_STEM, generated_at),
            });
        }
    }
    Ok(planned)
}

/// Renders and writes every planned output.
///
/// Unsupported formats are rejected before any file is written.
pub fn write_outputs(
    dataset: &PreparedDataset,
    output: &OutputOptions,
    options: &RenderOptions,
    generated_at: NaiveDateTime,
) -> Result<Vec<WrittenOutput>> {
    let planned = plan_outputs(dataset, output, options, generated_at)?;
    let views = employer_views(dataset, options);
    for entry in &planned {
        let contents = match &entry.kind {
            OutputKind::Comparison => render(entry.format, dataset, options, generated_at)?,
            OutputKind::Employer(key) => {
                let Some(view) = views.iter().find(|view| &view.employer.key == key) else {
                    continue;
                };
                render_employer(entry.format, dataset, view, options, generated_at)?
            }
            OutputKind::EmployerIndex => render_employers_index(
                dataset,
                &views,
                generated_at,
                |view| output_file_name(OutputFormat::Html, &view.stem, generated_at),
            )?
            .into_bytes(),
        };
        if let Some(parent) = entry.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ReportError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&entry.path, &contents).map_err(|source| ReportError::Write {
            path: entry.path.clone(),
            source,
        })?;
        info!(
            format = %entry.format,
            path = %entry.path.display(),
            bytes = contents.len(),
            "output written"
        );
    }
    Ok(planned)
}
