//! Per-employer charts and the index page linking them.
//!
//! Each employer with at least one range gets its own chart: one bar per
//! position, sorted by midpoint ascending. The index page lists every
//! employer and links its HTML page.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use chrono::NaiveDateTime;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesText, Event};

use compgrapher_model::{EmployerColumn, PreparedDataset, RenderOptions, SalaryRange};

use crate::error::Result;
use crate::format::{format_axis, format_currency};
use crate::layout::ValueAxis;
use crate::output::slug;
use crate::svg::{
    AXIS_HEIGHT, FONT_FAMILY, MARGIN_LEFT, MARGIN_RIGHT, MIN_PLOT_WIDTH, SvgWriter, TEXT_COLOR,
    TITLE_HEIGHT, employer_colors, px, svg_error, write_axis,
};

/// File stem of the index page.
pub const INDEX_STEM: &str = "employers_index";

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
h1, h2 { color: #2c3e50; }
.container { max-width: 1200px; margin: 0 auto; }
.info { background-color: #e8f4fc; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
.chart { overflow-x: auto; }
table { border-collapse: collapse; width: 100%; margin: 20px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
tr:nth-child(even) { background-color: #f9f9f9; }
.employer-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 20px; }
.employer-card { border: 1px solid #ddd; padding: 15px; border-radius: 5px; background-color: #f9f9f9; }
.employer-card h3 { margin-top: 0; color: #2c3e50; }
.btn { display: inline-block; padding: 8px 15px; background-color: #3498db; color: white; text-decoration: none; border-radius: 4px; }";

/// One position's range for the employer being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployerEntry<'a> {
    pub position: &'a str,
    pub range: SalaryRange,
}

/// Everything needed to draw one employer's chart.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployerView<'a> {
    pub employer: &'a EmployerColumn,
    pub color: String,
    /// Output file stem, unique within the run.
    pub stem: String,
    /// Sorted by midpoint ascending; ties keep position order.
    pub entries: Vec<EmployerEntry<'a>>,
}

impl EmployerView<'_> {
    /// Lowest and highest bound across the employer's ranges.
    pub fn bounds(&self) -> (f64, f64) {
        self.entries.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), entry| {
            let range = entry.range;
            (lo.min(range.low.min(range.high)), hi.max(range.low.max(range.high)))
        })
    }
}

/// Views for every employer with data, in column order.
///
/// Employers without a single range are skipped.
pub fn employer_views<'a>(
    dataset: &'a PreparedDataset,
    options: &RenderOptions,
) -> Vec<EmployerView<'a>> {
    let colors = employer_colors(dataset, options);
    let mut stems = BTreeSet::new();
    let mut views = Vec::new();
    for (employer, color) in dataset.employers.iter().zip(colors) {
        let mut entries: Vec<EmployerEntry<'a>> = dataset
            .positions
            .iter()
            .filter_map(|position| {
                position.range_for(&employer.key).map(|range| EmployerEntry {
                    position: position.title.as_str(),
                    range: *range,
                })
            })
            .collect();
        if entries.is_empty() {
            continue;
        }
        entries.sort_by(|a, b| a.range.midpoint().total_cmp(&b.range.midpoint()));

        let base = match slug(&employer.key) {
            name if name.is_empty() => format!("employer_{}", employer.index),
            name => name,
        };
        let mut stem = format!("{base}_salaries");
        if !stems.insert(stem.clone()) {
            stem = format!("{base}_{}_salaries", employer.index);
            stems.insert(stem.clone());
        }
        views.push(EmployerView {
            employer,
            color,
            stem,
            entries,
        });
    }
    views
}

/// Renders one employer's chart as a standalone SVG document.
pub fn render_employer_svg(view: &EmployerView<'_>, options: &RenderOptions) -> Result<String> {
    let mut svg = SvgWriter::new();
    svg.xml
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(svg_error)?;
    write_employer_chart(&mut svg, view, options)?;
    svg.finish()
}

fn write_employer_chart(
    svg: &mut SvgWriter,
    view: &EmployerView<'_>,
    options: &RenderOptions,
) -> Result<()> {
    let (low, high) = view.bounds();
    let axis = ValueAxis::covering(low.min(0.0), high.max(0.0));
    let width = f64::from(options.width).max(MARGIN_LEFT + MARGIN_RIGHT + MIN_PLOT_WIDTH);
    let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let row_height = f64::from(options.row_height) / 2.0;
    let plot_top = TITLE_HEIGHT + 10.0;
    let plot_height = row_height * view.entries.len() as f64;
    let height = plot_top + plot_height + AXIS_HEIGHT;

    svg.start(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ("width", px(width)),
            ("height", px(height)),
            ("viewBox", format!("0 0 {} {}", px(width), px(height))),
            ("font-family", FONT_FAMILY.to_string()),
        ],
    )?;
    svg.empty(
        "rect",
        &[
            ("width", px(width)),
            ("height", px(height)),
            ("fill", "#ffffff".to_string()),
        ],
    )?;
    svg.text(
        &[
            ("x", px(width / 2.0)),
            ("y", px(TITLE_HEIGHT - 14.0)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "18".to_string()),
            ("font-weight", "bold".to_string()),
            ("fill", TEXT_COLOR.to_string()),
        ],
        &format!("{} Salary Data by Position", view.employer.name),
    )?;

    write_axis(svg, &axis, options.show_grid, plot_top, plot_height, plot_width)?;

    let bar_height = (row_height * 0.7).max(1.0);
    for (row, entry) in view.entries.iter().enumerate() {
        let top = plot_top + row as f64 * row_height;
        let range = entry.range;
        let left = range.low.min(range.high);
        let right = range.low.max(range.high);
        let x = MARGIN_LEFT + axis.scale(left, plot_width);
        let bar_width = (axis.scale(right, plot_width) - axis.scale(left, plot_width)).max(1.0);
        let y = top + (row_height - bar_height) / 2.0;

        svg.start("g", &[("class", "position".to_string())])?;
        svg.text(
            &[
                ("x", px(MARGIN_LEFT - 8.0)),
                ("y", px(top + row_height / 2.0 + 4.0)),
                ("text-anchor", "end".to_string()),
                ("font-size", "11".to_string()),
                ("fill", TEXT_COLOR.to_string()),
            ],
            entry.position,
        )?;
        svg.start(
            "rect",
            &[
                ("x", px(x)),
                ("y", px(y)),
                ("width", px(bar_width)),
                ("height", px(bar_height)),
                ("fill", view.color.clone()),
            ],
        )?;
        svg.start("title", &[])?;
        svg.xml
            .write_event(Event::Text(BytesText::new(&format!(
                "{}: {} to {}",
                entry.position,
                format_currency(range.low),
                format_currency(range.high)
            ))))
            .map_err(svg_error)?;
        svg.end("title")?;
        svg.end("rect")?;
        if options.show_labels {
            svg.text(
                &[
                    ("x", px(x + bar_width + 4.0)),
                    ("y", px(y + bar_height / 2.0 + 3.0)),
                    ("font-size", "9".to_string()),
                    ("fill", TEXT_COLOR.to_string()),
                ],
                &format!("{} - {}", format_axis(range.low), format_axis(range.high)),
            )?;
        }
        svg.end("g")?;
    }

    svg.end("svg")
}

/// Renders one employer's HTML page with its chart and range table.
///
/// `index_file` is the file name of the index page in the same directory.
pub fn render_employer_html(
    dataset: &PreparedDataset,
    view: &EmployerView<'_>,
    options: &RenderOptions,
    generated_at: NaiveDateTime,
    index_file: &str,
) -> Result<String> {
    let mut chart = SvgWriter::new();
    write_employer_chart(&mut chart, view, options)?;
    let chart = chart.finish()?;
    let name = escape(view.employer.name.as_str());
    let (low, high) = view.bounds();

    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{name} Salary Visualization</title>")?;
    writeln!(html, "<style>\n{STYLE}\n</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>\n<div class=\"container\">")?;
    writeln!(html, "<h1>{name} Salary Data Visualization</h1>")?;
    writeln!(html, "<p><a href=\"{}\">All employers</a></p>", escape(index_file))?;

    writeln!(html, "<div class=\"info\">")?;
    writeln!(
        html,
        "<p><strong>Generated:</strong> {}</p>",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(html, "<p><strong>Employer:</strong> {name}</p>")?;
    writeln!(
        html,
        "<p><strong>Data Source:</strong> {}</p>",
        escape(dataset.source.file_name().as_str())
    )?;
    writeln!(
        html,
        "<p><strong>Positions analyzed:</strong> {}</p>",
        view.entries.len()
    )?;
    writeln!(
        html,
        "<p><strong>Salary range:</strong> {} - {}</p>",
        format_currency(low),
        format_currency(high)
    )?;
    writeln!(html, "</div>")?;

    writeln!(html, "<h2>Salary Distribution by Position</h2>")?;
    writeln!(html, "<div class=\"chart\">\n{chart}\n</div>")?;

    writeln!(html, "<h2>Salary Data Table</h2>")?;
    writeln!(
        html,
        "<table>\n<tr><th>Position</th><th>Low</th><th>High</th><th>Midpoint</th></tr>"
    )?;
    for entry in &view.entries {
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(entry.position),
            format_currency(entry.range.low),
            format_currency(entry.range.high),
            format_currency(entry.range.midpoint())
        )?;
    }
    writeln!(html, "</table>")?;
    writeln!(html, "</div>\n</body>\n</html>")?;
    Ok(html)
}

/// Renders the index page. `page_file` maps a view to the file name of its
/// HTML page in the same directory.
pub fn render_employers_index(
    dataset: &PreparedDataset,
    views: &[EmployerView<'_>],
    generated_at: NaiveDateTime,
    page_file: impl Fn(&EmployerView<'_>) -> String,
) -> Result<String> {
    let mut sorted: Vec<&EmployerView<'_>> = views.iter().collect();
    sorted.sort_by(|a, b| a.employer.key.cmp(&b.employer.key));

    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>Multi-Employer Salary Visualizations</title>")?;
    writeln!(html, "<style>\n{STYLE}\n</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>\n<div class=\"container\">")?;
    writeln!(html, "<h1>Multi-Employer Salary Visualizations</h1>")?;
    writeln!(html, "<div class=\"info\">")?;
    writeln!(
        html,
        "<p><strong>Generated:</strong> {}</p>",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(html, "<p><strong>Total Employers:</strong> {}</p>", views.len())?;
    writeln!(
        html,
        "<p><strong>Data Source:</strong> {}</p>",
        escape(dataset.source.file_name().as_str())
    )?;
    writeln!(html, "</div>")?;

    writeln!(html, "<h2>Employer Visualizations</h2>")?;
    writeln!(html, "<div class=\"employer-grid\">")?;
    for view in sorted {
        let name = escape(view.employer.name.as_str());
        writeln!(html, "<div class=\"employer-card\">")?;
        writeln!(html, "<h3>{name}</h3>")?;
        writeln!(html, "<p>{} positions</p>", view.entries.len())?;
        writeln!(
            html,
            "<a href=\"{}\" class=\"btn\">View {name}</a>",
            escape(page_file(view).as_str())
        )?;
        writeln!(html, "</div>")?;
    }
    writeln!(html, "</div>")?;
    writeln!(html, "</div>\n</body>\n</html>")?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use compgrapher_model::{InputFormat, PositionRecord, SourceInfo, ValidationReport};

    fn dataset(employers: &[&str]) -> PreparedDataset {
        let employers: Vec<EmployerColumn> = employers
            .iter()
            .enumerate()
            .map(|(idx, name)| EmployerColumn::new(name, idx + 1))
            .collect();
        let first = employers[0].key.clone();
        PreparedDataset {
            source: SourceInfo {
                path: PathBuf::from("in.csv"),
                format: InputFormat::Csv,
                sha256: String::new(),
                data_rows: 4,
            },
            highlighted: employers[0].clone(),
            positions: vec![
                PositionRecord::new("Senior").with_range(first.clone(), SalaryRange::new(90.0, 110.0)),
                PositionRecord::new("Junior").with_range(first, SalaryRange::new(40.0, 60.0)),
            ],
            employers,
            stats: Vec::new(),
            gaps: Vec::new(),
            report: ValidationReport::default(),
        }
    }

    #[test]
    fn employers_without_ranges_are_skipped() {
        let dataset = dataset(&["Acme", "Empty"]);
        let views = employer_views(&dataset, &RenderOptions::default());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].stem, "acme_salaries");
        let order: Vec<&str> = views[0].entries.iter().map(|e| e.position).collect();
        assert_eq!(order, vec!["Junior", "Senior"]);
        assert_eq!(views[0].bounds(), (40.0, 110.0));
    }

    #[test]
    fn colliding_stems_get_column_suffix() {
        let mut dataset = dataset(&["A&B", "A B"]);
        let second = dataset.employers[1].key.clone();
        dataset.positions[0]
            .ranges
            .insert(second, SalaryRange::new(1.0, 2.0));
        let views = employer_views(&dataset, &RenderOptions::default());
        let stems: Vec<&str> = views.iter().map(|v| v.stem.as_str()).collect();
        assert_eq!(stems, vec!["a_b_salaries", "a_b_2_salaries"]);
    }
}
