//! Standalone HTML report.

use std::fmt::{self, Write as _};

use chrono::NaiveDateTime;
use quick_xml::escape::escape;

use compgrapher_model::{PreparedDataset, RenderOptions};

use crate::difference::difference_analysis;
use crate::error::Result;
use crate::format::{format_currency, format_percent};
use crate::layout::chart_order;
use crate::svg::render_svg_fragment;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
h1, h2 { color: #2c3e50; }
.container { max-width: 1400px; margin: 0 auto; }
.info { background-color: #e8f4fc; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
.chart { overflow-x: auto; }
table { border-collapse: collapse; width: 100%; margin: 20px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; position: sticky; top: 0; }
tr:nth-child(even) { background-color: #f9f9f9; }
.positive { color: #27ae60; font-weight: bold; }
.negative { color: #e74c3c; font-weight: bold; }
.warnings li { color: #8a6d3b; }";

/// Renders the full report: info block, chart, tables, and warnings.
pub fn render_html(
    dataset: &PreparedDataset,
    options: &RenderOptions,
    generated_at: NaiveDateTime,
) -> Result<String> {
    let chart = render_svg_fragment(dataset, options)?;
    let highlighted = escape(dataset.highlighted.name.as_str());

    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{highlighted} Salary Comparison</title>")?;
    writeln!(html, "<style>\n{STYLE}\n</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>\n<div class=\"container\">")?;
    writeln!(html, "<h1>{highlighted} Salary Comparison Analysis</h1>")?;

    write_info(&mut html, dataset, generated_at)?;

    writeln!(html, "<h2>Chart</h2>")?;
    writeln!(html, "<div class=\"chart\">\n{chart}\n</div>")?;

    write_ranges(&mut html, dataset)?;
    write_statistics(&mut html, dataset)?;
    write_differences(&mut html, dataset)?;
    write_warnings(&mut html, dataset)?;

    writeln!(html, "</div>\n</body>\n</html>")?;
    Ok(html)
}

fn write_info(
    html: &mut String,
    dataset: &PreparedDataset,
    generated_at: NaiveDateTime,
) -> fmt::Result {
    let source = &dataset.source;
    writeln!(html, "<div class=\"info\">")?;
    writeln!(
        html,
        "<p><strong>Generated:</strong> {}</p>",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(
        html,
        "<p><strong>Data Source:</strong> {} ({})</p>",
        escape(source.file_name().as_str()),
        source.format
    )?;
    writeln!(html, "<p><strong>SHA-256:</strong> <code>{}</code></p>", source.sha256)?;
    writeln!(
        html,
        "<p><strong>Highlighted Employer:</strong> {}</p>",
        escape(dataset.highlighted.name.as_str())
    )?;
    writeln!(
        html,
        "<p><strong>Positions Compared:</strong> {}</p>",
        dataset.positions.len()
    )?;
    writeln!(
        html,
        "<p><strong>Employers Included:</strong> {}</p>",
        dataset.employers.len()
    )?;
    writeln!(html, "<p><strong>Warnings:</strong> {}</p>", dataset.report.len())?;
    writeln!(html, "</div>")?;
    Ok(())
}

fn write_ranges(html: &mut String, dataset: &PreparedDataset) -> fmt::Result {
    writeln!(html, "<h2>Salary Ranges</h2>")?;
    writeln!(html, "<table>\n<tr><th>Position</th>")?;
    for employer in &dataset.employers {
        write!(html, "<th>{}</th>", escape(employer.name.as_str()))?;
    }
    writeln!(html, "</tr>")?;
    for position in chart_order(dataset) {
        write!(html, "<tr><td>{}</td>", escape(position.title.as_str()))?;
        for employer in &dataset.employers {
            match position.range_for(&employer.key) {
                Some(range) => {
                    write!(
                        html,
                        "<td>{} - {}</td>",
                        format_currency(range.low),
                        format_currency(range.high)
                    )?;
                }
                None => html.push_str("<td>n/a</td>"),
            }
        }
        writeln!(html, "</tr>")?;
    }
    writeln!(html, "</table>")?;
    Ok(())
}

fn write_statistics(html: &mut String, dataset: &PreparedDataset) -> fmt::Result {
    writeln!(html, "<h2>Statistics</h2>")?;
    writeln!(
        html,
        "<table>\n<tr><th>Position</th><th>Min</th><th>Max</th><th>Median</th><th>Mean</th><th>Values</th></tr>"
    )?;
    for stats in &dataset.stats {
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(stats.position.as_str()),
            format_currency(stats.min),
            format_currency(stats.max),
            format_currency(stats.median),
            format_currency(stats.mean),
            stats.sample_size
        )?;
    }
    writeln!(html, "</table>")?;
    if !dataset.gaps.is_empty() {
        writeln!(html, "<p>Positions without data:</p>\n<ul>")?;
        for gap in &dataset.gaps {
            writeln!(html, "<li>{}</li>", escape(gap.position.as_str()))?;
        }
        writeln!(html, "</ul>")?;
    }
    Ok(())
}

fn write_differences(html: &mut String, dataset: &PreparedDataset) -> fmt::Result {
    writeln!(html, "<h2>Difference Analysis</h2>")?;
    writeln!(
        html,
        "<p>Midpoint of each employer's range compared with {}.</p>",
        escape(dataset.highlighted.name.as_str())
    )?;
    writeln!(
        html,
        "<table>\n<tr><th>Position</th><th>Employer</th><th>{} Midpoint</th><th>Employer Midpoint</th><th>Difference</th><th>Percent</th></tr>",
        escape(dataset.highlighted.name.as_str())
    )?;
    for row in difference_analysis(dataset) {
        let class = if row.difference > 0.0 { "positive" } else { "negative" };
        let percent = row.percent.map_or_else(|| "n/a".to_string(), format_percent);
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{class}\">{}</td><td class=\"{class}\">{percent}</td></tr>",
            escape(row.position.as_str()),
            escape(row.employer.as_str()),
            format_currency(row.highlighted_midpoint),
            format_currency(row.employer_midpoint),
            format_currency(row.difference),
        )?;
    }
    writeln!(html, "</table>")?;
    Ok(())
}

fn write_warnings(html: &mut String, dataset: &PreparedDataset) -> fmt::Result {
    writeln!(html, "<h2>Warnings</h2>")?;
    if dataset.report.is_empty() {
        writeln!(html, "<p>No data-quality warnings.</p>")?;
        return Ok(());
    }
    writeln!(html, "<ul class=\"warnings\">")?;
    for issue in &dataset.report.issues {
        writeln!(
            html,
            "<li><code>{}</code> {}</li>",
            issue.code(),
            escape(issue.message().as_str())
        )?;
    }
    writeln!(html, "</ul>")?;
    Ok(())
}
