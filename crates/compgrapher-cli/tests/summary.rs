//! Summary rows for terminal output.

use std::fs;

use compgrapher_cli::summary::{employer_rows, issue_rows, stats_rows};
use compgrapher_core::prepare_dataset;
use compgrapher_model::{PipelineConfig, PreparedDataset};
use tempfile::TempDir;

fn prepare(contents: &str) -> PreparedDataset {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, contents).unwrap();
    prepare_dataset(&path, &PipelineConfig::default()).unwrap()
}

#[test]
fn stats_rows_format_currency() {
    let dataset = prepare(
        "POSITION TITLE,A,B\nEngineer,100,95\n,80,75\nScientist,120,110\n,90,85\n",
    );
    let lines: Vec<String> = stats_rows(&dataset)
        .into_iter()
        .map(|row| {
            format!(
                "{} | {} | {} | {} | {} | {}",
                row.position, row.min, row.max, row.median, row.mean, row.sample_size
            )
        })
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    Engineer | $75.00 | $100.00 | $87.50 | $87.50 | 4
    Scientist | $85.00 | $120.00 | $100.00 | $101.25 | 4
    ");
}

#[test]
fn employer_rows_mark_highlight_and_coverage() {
    let dataset = prepare("POSITION TITLE,A,B,C\nEngineer,100,95,\n,80,75,\n");
    let rows = employer_rows(&dataset);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].column, 2);
    assert!(rows[0].highlighted);
    assert!(!rows[1].highlighted);
    assert_eq!(rows[1].positions, 1);
    assert_eq!(rows[2].name, "C");
    assert_eq!(rows[2].positions, 0);
}

#[test]
fn issue_rows_carry_codes_and_categories() {
    let dataset = prepare("POSITION TITLE,A,B,C\nEngineer,100,95,\n,80,75,\n");
    let rows = issue_rows(&dataset.report);
    assert!(!rows.is_empty());
    assert!(rows.iter().any(|row| row.category == "Coverage"));
    assert!(rows.iter().all(|row| row.code.starts_with("CG")));
}
