//! CLI argument definitions for compgrapher.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use compgrapher_model::{OutputFormat, PipelineConfig};

#[derive(Parser)]
#[command(
    name = "compgrapher",
    version,
    about = "Compensation comparison charts from paired high/low salary tables",
    long_about = "Read a compensation table (position titles with alternating high and low\n\
                  salary rows per employer), validate it, and render floating bar charts\n\
                  comparing a highlighted employer with the rest.\n\n\
                  Writes SVG charts, HTML reports, JSON datasets, and CSV statistics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: $COMPGRAPHER_CONFIG, then ./compgrapher.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prepare the dataset and write charts and reports.
    Render(RenderArgs),

    /// Prepare the dataset and print warnings without writing anything.
    Check(CheckArgs),

    /// List recognized employer columns and their data coverage.
    Employers(PipelineArgs),
}

/// Options shared by every command that prepares a dataset.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Compensation table (.csv, .tsv, .xlsx, .xls, .ods). Defaults to the
    /// configured input_path.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Employer to highlight (default: first employer column).
    #[arg(long = "client", value_name = "NAME")]
    pub client: Option<String>,

    /// Additional column header to exclude from the employer set.
    #[arg(long = "bad-column", value_name = "HEADER")]
    pub bad_columns: Vec<String>,

    /// Position title to leave out of the comparison.
    #[arg(long = "exclude-position", value_name = "TITLE")]
    pub exclude_positions: Vec<String>,

    /// Leave out the N highest-paid positions.
    #[arg(long = "drop-top-paid", value_name = "N")]
    pub drop_top_paid: Option<usize>,
}

impl PipelineArgs {
    /// Layers command-line values over the loaded configuration.
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(input) = &self.input {
            config.input_path = Some(input.clone());
        }
        if let Some(client) = &self.client {
            config.highlighted_employer = Some(client.clone());
        }
        config.bad_columns.extend(self.bad_columns.iter().cloned());
        config
            .exclude_positions
            .extend(self.exclude_positions.iter().cloned());
        if let Some(count) = self.drop_top_paid {
            config.drop_top_paid = count;
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Output directory (default: configured output.dir).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format to write (svg, html, json, csv, png, jpg); repeat for several.
    #[arg(long = "format", value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Hide chart grid lines.
    #[arg(long = "no-grid")]
    pub no_grid: bool,

    /// Hide value labels next to bars.
    #[arg(long = "no-labels")]
    pub no_labels: bool,

    /// Also write one chart per employer and an index page linking them.
    #[arg(long = "per-employer")]
    pub per_employer: bool,

    /// Prepare and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit with status 2 when data-quality warnings were found.
    #[arg(long = "fail-on-warnings")]
    pub fail_on_warnings: bool,
}

impl RenderArgs {
    pub fn apply(&self, config: &mut PipelineConfig) {
        self.pipeline.apply(config);
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if !self.formats.is_empty() {
            config.output.formats = self.formats.clone();
        }
        if self.no_grid {
            config.render.show_grid = false;
        }
        if self.no_labels {
            config.render.show_labels = false;
        }
        if self.per_employer {
            config.output.per_employer = true;
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Exit with status 2 when data-quality warnings were found.
    #[arg(long = "fail-on-warnings")]
    pub fail_on_warnings: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_flags_override_config() {
        let cli = Cli::parse_from([
            "compgrapher",
            "render",
            "data.csv",
            "--client",
            "Acme Town",
            "--format",
            "svg",
            "--format",
            "json",
            "--bad-column",
            "Notes",
            "--drop-top-paid",
            "2",
            "--no-grid",
        ]);
        let Command::Render(args) = cli.command else {
            panic!("expected render command");
        };
        let mut config = PipelineConfig::default();
        args.apply(&mut config);
        assert_eq!(config.input_path, Some(PathBuf::from("data.csv")));
        assert_eq!(config.highlighted_employer.as_deref(), Some("Acme Town"));
        assert_eq!(
            config.output.formats,
            vec![OutputFormat::Svg, OutputFormat::Json]
        );
        assert!(config.bad_columns.iter().any(|c| c == "ERI"));
        assert!(config.bad_columns.iter().any(|c| c == "Notes"));
        assert_eq!(config.drop_top_paid, 2);
        assert!(!config.render.show_grid);
        assert!(config.render.show_labels);
    }

    #[test]
    fn no_labels_turns_off_default_labels() {
        let cli = Cli::parse_from(["compgrapher", "render", "--no-labels"]);
        let Command::Render(args) = cli.command else {
            panic!("expected render command");
        };
        let mut config = PipelineConfig::default();
        assert!(config.render.show_labels);
        args.apply(&mut config);
        assert!(!config.render.show_labels);
        assert!(config.render.show_grid);
    }

    #[test]
    fn per_employer_and_raster_formats() {
        let cli = Cli::parse_from([
            "compgrapher",
            "render",
            "--per-employer",
            "--format",
            "png",
            "--format",
            "jpeg",
        ]);
        let Command::Render(args) = cli.command else {
            panic!("expected render command");
        };
        let mut config = PipelineConfig::default();
        args.apply(&mut config);
        assert!(config.output.per_employer);
        assert_eq!(
            config.output.formats,
            vec![OutputFormat::Png, OutputFormat::Jpg]
        );
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        let result = Cli::try_parse_from(["compgrapher", "render", "--format", "gif"]);
        assert!(result.is_err());
    }
}
