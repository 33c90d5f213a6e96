//! compgrapher command-line entry point.

use std::io::{self, IsTerminal};

use clap::Parser;

use compgrapher_cli::cli::{Cli, Command};
use compgrapher_cli::commands::{run_check, run_employers, run_render};
use compgrapher_cli::config::load_config;
use compgrapher_cli::logging::{LogConfig, init_logging};
use compgrapher_cli::summary::{print_employers, print_issues, print_summary};

/// Exit status when `--fail-on-warnings` is set and warnings were found.
const EXIT_WARNINGS: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = LogConfig::from_cli(&cli, io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = match load_config(cli.config.as_deref()) {
        Ok((config, _source)) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match cli.command {
        Command::Render(args) => match run_render(&args, config) {
            Ok(outcome) => {
                print_summary(&outcome.dataset, &outcome.written, outcome.dry_run);
                warning_exit_code(args.fail_on_warnings, outcome.dataset.has_warnings())
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Check(args) => match run_check(&args, config) {
            Ok(dataset) => {
                print_summary(&dataset, &[], false);
                warning_exit_code(args.fail_on_warnings, dataset.has_warnings())
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Employers(args) => match run_employers(&args, config) {
            Ok(dataset) => {
                print_employers(&dataset);
                print_issues(&dataset.report);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn warning_exit_code(fail_on_warnings: bool, has_warnings: bool) -> i32 {
    if fail_on_warnings && has_warnings {
        EXIT_WARNINGS
    } else {
        0
    }
}
