//! Row extraction against files on disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use compgrapher_ingest::{IngestError, extract_rows};
use compgrapher_model::{Cell, InputFormat, PipelineConfig};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn default_bad_columns() -> BTreeSet<String> {
    PipelineConfig::default().bad_column_keys()
}

const SAMPLE: &str = "\
POSITION TITLE,Employer A,Employer B,Comp Average
Engineer,100,95,97.5
,80,75,77.5
Scientist,\"$90,000\",85000,87500
,\"$70,000\",65000,67500
";

#[test]
fn extracts_sample_table() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sample.csv", SAMPLE);

    let extraction = extract_rows(&path, &default_bad_columns()).unwrap();

    let names: Vec<&str> = extraction.employers.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Employer A", "Employer B"]);
    assert_eq!(extraction.rows.len(), 4);
    assert_eq!(extraction.rows[0].title.as_deref(), Some("Engineer"));
    assert_eq!(extraction.rows[1].title, None);
    assert_eq!(extraction.rows[1].line, 3);
    assert_eq!(
        extraction.rows[2].cells,
        vec![Cell::Number(90_000.0), Cell::Number(85_000.0)]
    );
    assert_eq!(extraction.source.format, InputFormat::Csv);
    assert_eq!(extraction.source.data_rows, 4);
    assert_eq!(extraction.source.sha256.len(), 64);
}

#[test]
fn bad_columns_are_configurable() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sample.csv", SAMPLE);

    let extraction = extract_rows(&path, &BTreeSet::new()).unwrap();
    assert_eq!(extraction.employers.len(), 3);
    assert_eq!(extraction.employers[2].name, "Comp Average");
}

#[test]
fn row_with_only_bad_column_values_is_kept_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "sample.csv",
        "Title,A,ERI\nVacant,,5\n,,5\nClerk,10,1\n,8,1\n",
    );

    let extraction = extract_rows(&path, &default_bad_columns()).unwrap();
    assert_eq!(extraction.rows.len(), 4);
    assert_eq!(extraction.rows[1].cells, vec![Cell::Empty]);
    assert_eq!(extraction.rows[2].title.as_deref(), Some("Clerk"));
}

#[test]
fn blank_low_row_keeps_pairing() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "sample.csv",
        "Title,A,B\nEngineer,100,95\n,80,75\nVacant,,\n,,\nScientist,120,110\n,90,85\n",
    );

    let extraction = extract_rows(&path, &default_bad_columns()).unwrap();
    let titles: Vec<Option<&str>> = extraction.rows.iter().map(|r| r.title.as_deref()).collect();
    assert_eq!(
        titles,
        vec![Some("Engineer"), None, Some("Vacant"), None, Some("Scientist"), None]
    );
    assert_eq!(extraction.source.data_rows, 6);
}

#[test]
fn tab_delimited_input() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sample.tsv", "Title\tA\tB\nClerk\t10\t12\n\t8\t9\n");

    let extraction = extract_rows(&path, &default_bad_columns()).unwrap();
    assert_eq!(extraction.source.format, InputFormat::Tsv);
    assert_eq!(extraction.rows[1].cells, vec![Cell::Number(8.0), Cell::Number(9.0)]);
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sample.txt", SAMPLE);

    let err = extract_rows(&path, &default_bad_columns()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { ref extension, .. } if extension == "txt"));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");

    let err = extract_rows(&path, &default_bad_columns()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn header_only_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "header.csv", "POSITION TITLE,Employer A\n");

    let err = extract_rows(&path, &default_bad_columns()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyDataset { .. }));
}

#[test]
fn only_bad_columns_leaves_no_employers() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.csv", "Title,ERI,Comp Average\nClerk,1,2\n,1,2\n");

    let err = extract_rows(&path, &default_bad_columns()).unwrap_err();
    assert!(err.to_string().contains("no employer columns"));
}

#[test]
fn duplicate_employers_differing_in_case_and_spacing() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "dup.csv", "Title,Employer A,employer  a\nClerk,1,2\n,1,2\n");

    let err = extract_rows(&path, &default_bad_columns()).unwrap_err();
    assert!(matches!(err, IngestError::DuplicateEmployer { .. }));
}

#[test]
fn invalid_cells_are_kept_as_invalid() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.csv", "Title,A,B\nClerk,n/a,\n,8,9\n");

    let extraction = extract_rows(&path, &default_bad_columns()).unwrap();
    assert_eq!(
        extraction.rows[0].cells,
        vec![Cell::Invalid("n/a".to_string()), Cell::Empty]
    );
}
