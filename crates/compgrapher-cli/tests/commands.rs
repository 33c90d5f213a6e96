//! Command runners against files on disk.

use std::fs;
use std::path::PathBuf;

use compgrapher_cli::cli::{CheckArgs, PipelineArgs, RenderArgs};
use compgrapher_cli::commands::{run_check, run_employers, run_render};
use compgrapher_model::{OutputFormat, PipelineConfig};
use tempfile::TempDir;

const SAMPLE: &str = "\
POSITION TITLE,A,B,Comp Average
Engineer,100,95,97.5
,80,75,77.5
Scientist,120,110,115
,90,85,87.5
";

fn fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("sample.csv");
    fs::write(&path, SAMPLE).expect("write fixture");
    path
}

fn render_args(input: PathBuf, output_dir: PathBuf) -> RenderArgs {
    RenderArgs {
        pipeline: PipelineArgs {
            input: Some(input),
            ..PipelineArgs::default()
        },
        output_dir: Some(output_dir),
        formats: vec![OutputFormat::Svg, OutputFormat::Csv],
        ..RenderArgs::default()
    }
}

#[test]
fn render_writes_each_format_under_its_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let args = render_args(fixture(&dir), out.clone());

    let outcome = run_render(&args, PipelineConfig::default()).unwrap();

    assert!(!outcome.dry_run);
    assert_eq!(outcome.written.len(), 2);
    for written in &outcome.written {
        assert!(written.path.starts_with(out.join(written.format.extension())));
        assert!(written.path.is_file());
    }
    let svg = &outcome.written[0].path;
    let name = svg.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("a_comparison_"));
    assert!(name.ends_with(".svg"));
}

#[test]
fn dry_run_plans_without_writing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let args = RenderArgs {
        dry_run: true,
        ..render_args(fixture(&dir), out.clone())
    };

    let outcome = run_render(&args, PipelineConfig::default()).unwrap();

    assert!(outcome.dry_run);
    assert_eq!(outcome.written.len(), 2);
    assert!(!out.exists());
}

#[test]
fn pdf_from_config_is_rejected_before_reading() {
    let dir = TempDir::new().unwrap();
    let mut config = PipelineConfig::default();
    config.output.formats = vec![OutputFormat::Pdf];
    let args = RenderArgs {
        pipeline: PipelineArgs {
            input: Some(dir.path().join("missing.csv")),
            ..PipelineArgs::default()
        },
        ..RenderArgs::default()
    };

    let err = run_render(&args, config).unwrap_err();
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn missing_input_is_an_error() {
    let err = run_check(&CheckArgs::default(), PipelineConfig::default()).unwrap_err();
    assert!(err.to_string().contains("no input file given"));
}

#[test]
fn input_path_falls_back_to_config() {
    let dir = TempDir::new().unwrap();
    let mut config = PipelineConfig::default();
    config.input_path = Some(fixture(&dir));

    let dataset = run_check(&CheckArgs::default(), config).unwrap();
    assert_eq!(dataset.positions.len(), 2);
    assert!(!dataset.has_warnings());
}

#[test]
fn employers_honors_client_flag() {
    let dir = TempDir::new().unwrap();
    let args = PipelineArgs {
        input: Some(fixture(&dir)),
        client: Some("b".to_string()),
        ..PipelineArgs::default()
    };

    let dataset = run_employers(&args, PipelineConfig::default()).unwrap();
    assert_eq!(dataset.highlighted.name, "B");
    assert_eq!(dataset.employers.len(), 2);
}

#[test]
fn unknown_client_reports_available_employers() {
    let dir = TempDir::new().unwrap();
    let args = PipelineArgs {
        input: Some(fixture(&dir)),
        client: Some("Acme".to_string()),
        ..PipelineArgs::default()
    };

    let err = run_employers(&args, PipelineConfig::default()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("unknown client 'Acme'"));
    assert!(message.contains("A, B"));
}

#[test]
fn no_labels_removes_value_labels_from_chart() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    let svg_text = |args: &RenderArgs| {
        let outcome = run_render(args, PipelineConfig::default()).unwrap();
        fs::read_to_string(&outcome.written[0].path).unwrap()
    };
    let labelled = RenderArgs {
        formats: vec![OutputFormat::Svg],
        ..render_args(input.clone(), dir.path().join("labelled"))
    };
    let bare = RenderArgs {
        no_labels: true,
        ..RenderArgs {
            formats: vec![OutputFormat::Svg],
            ..render_args(input, dir.path().join("bare"))
        }
    };

    assert!(svg_text(&labelled).contains("$80 - $100"));
    assert!(!svg_text(&bare).contains("$80 - $100"));
}

#[test]
fn per_employer_writes_charts_and_index() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let args = RenderArgs {
        formats: vec![OutputFormat::Svg, OutputFormat::Html],
        per_employer: true,
        ..render_args(fixture(&dir), out.clone())
    };

    let outcome = run_render(&args, PipelineConfig::default()).unwrap();

    // comparison svg + html, two employers times two formats, one index
    assert_eq!(outcome.written.len(), 7);
    for written in &outcome.written {
        assert!(written.path.is_file(), "missing {}", written.path.display());
    }
    let index = outcome.written.last().unwrap();
    let index_name = index.path.file_name().unwrap().to_string_lossy();
    assert!(index_name.starts_with("employers_index_"));
    let page = fs::read_to_string(&index.path).unwrap();
    assert!(page.contains("a_salaries_"));
    assert!(page.contains("b_salaries_"));
}

#[cfg(feature = "raster")]
#[test]
fn png_and_jpg_are_written() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let args = RenderArgs {
        formats: vec![OutputFormat::Png, OutputFormat::Jpg],
        ..render_args(fixture(&dir), out.clone())
    };

    let outcome = run_render(&args, PipelineConfig::default()).unwrap();

    assert_eq!(outcome.written.len(), 2);
    let png = fs::read(&outcome.written[0].path).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
    let jpg = fs::read(&outcome.written[1].path).unwrap();
    assert!(jpg.starts_with(&[0xFF, 0xD8]));
    assert!(outcome.written[1].path.starts_with(out.join("jpg")));
}
