//! Terminal summaries for prepared datasets.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use compgrapher_model::{Category, PreparedDataset, ValidationReport};
use compgrapher_report::WrittenOutput;
use compgrapher_report::format::format_currency;

/// One line of the statistics table, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRow {
    pub position: String,
    pub min: String,
    pub max: String,
    pub median: String,
    pub mean: String,
    pub sample_size: usize,
}

/// One line of the issue table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRow {
    pub code: &'static str,
    pub category: &'static str,
    pub message: String,
}

/// One line of the employer listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerRow {
    pub column: usize,
    pub name: String,
    pub positions: usize,
    pub highlighted: bool,
}

pub fn stats_rows(dataset: &PreparedDataset) -> Vec<StatsRow> {
    dataset
        .stats
        .iter()
        .map(|stats| StatsRow {
            position: stats.position.clone(),
            min: format_currency(stats.min),
            max: format_currency(stats.max),
            median: format_currency(stats.median),
            mean: format_currency(stats.mean),
            sample_size: stats.sample_size,
        })
        .collect()
}

pub fn issue_rows(report: &ValidationReport) -> Vec<IssueRow> {
    report
        .issues
        .iter()
        .map(|issue| IssueRow {
            code: issue.code(),
            category: issue.category().label(),
            message: issue.message(),
        })
        .collect()
}

/// Employers in source order with the number of positions they cover.
pub fn employer_rows(dataset: &PreparedDataset) -> Vec<EmployerRow> {
    dataset
        .employers
        .iter()
        .map(|employer| EmployerRow {
            // 1-based, matching spreadsheet column numbering.
            column: employer.index + 1,
            name: employer.name.clone(),
            positions: dataset
                .positions
                .iter()
                .filter(|position| position.range_for(&employer.key).is_some())
                .count(),
            highlighted: employer.key == dataset.highlighted.key,
        })
        .collect()
}

pub fn print_summary(dataset: &PreparedDataset, written: &[WrittenOutput], dry_run: bool) {
    println!(
        "Input: {} ({}, {} data rows)",
        dataset.source.path.display(),
        dataset.source.format,
        dataset.source.data_rows
    );
    println!("Highlighted employer: {}", dataset.highlighted.name);
    println!(
        "Positions: {} compared, {} employers",
        dataset.positions.len(),
        dataset.employers.len()
    );
    println!("{}", stats_table(dataset));
    print_issues(&dataset.report);
    if written.is_empty() {
        return;
    }
    if dry_run {
        println!("Would write:");
    } else {
        println!("Wrote:");
    }
    for output in written {
        println!("  {:<5} {}", output.format.to_string(), output.path.display());
    }
}

/// Prints the issue table, or a single line when the data is clean.
pub fn print_issues(report: &ValidationReport) {
    if report.is_empty() {
        println!("No data-quality warnings.");
        return;
    }
    println!(
        "Warnings: {} ({} assembly, {} range, {} coverage)",
        report.len(),
        report.count_in(Category::Assembly),
        report.count_in(Category::Range),
        report.count_in(Category::Coverage)
    );
    println!("{}", issue_table(report));
}

pub fn print_employers(dataset: &PreparedDataset) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Employer"),
        header_cell("Positions"),
        header_cell("Highlighted"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in employer_rows(dataset) {
        let name = if row.highlighted {
            Cell::new(row.name)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(row.name)
        };
        let positions = if row.positions == 0 {
            Cell::new(row.positions).fg(Color::Yellow)
        } else {
            Cell::new(row.positions)
        };
        table.add_row(vec![
            Cell::new(row.column),
            name,
            positions,
            if row.highlighted {
                Cell::new("✓").fg(Color::Green)
            } else {
                dim_cell("-")
            },
        ]);
    }
    println!("{table}");
}

fn stats_table(dataset: &PreparedDataset) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Position"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Median"),
        header_cell("Mean"),
        header_cell("Values"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in stats_rows(dataset) {
        table.add_row(vec![
            Cell::new(row.position),
            Cell::new(row.min),
            Cell::new(row.max),
            Cell::new(row.median),
            Cell::new(row.mean),
            Cell::new(row.sample_size),
        ]);
    }
    for gap in &dataset.gaps {
        table.add_row(vec![
            Cell::new(&gap.position).fg(Color::Yellow),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell(0),
        ]);
    }
    table
}

fn issue_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Category"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for row in issue_rows(report) {
        table.add_row(vec![
            Cell::new(row.code).fg(Color::Yellow),
            Cell::new(row.category),
            Cell::new(row.message),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_report_has_no_rows() {
        assert!(issue_rows(&ValidationReport::default()).is_empty());
    }
}
