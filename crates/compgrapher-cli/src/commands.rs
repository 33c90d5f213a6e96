//! Command runners.
//!
//! Each runner takes the configuration loaded from file, layers the
//! command-line arguments over it, and prepares the dataset. Printing is
//! left to `main`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDateTime};
use tracing::{info, info_span};

use compgrapher_core::prepare_dataset;
use compgrapher_model::{PipelineConfig, PreparedDataset};
use compgrapher_report::{WrittenOutput, plan_outputs, write_outputs};

use crate::cli::{CheckArgs, PipelineArgs, RenderArgs};

/// Result of the `render` command.
#[derive(Debug)]
pub struct RenderOutcome {
    pub dataset: PreparedDataset,
    /// Files written, or the files that would be written in a dry run.
    pub written: Vec<WrittenOutput>,
    pub dry_run: bool,
}

pub fn run_render(args: &RenderArgs, mut config: PipelineConfig) -> Result<RenderOutcome> {
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;
    let dataset = prepare(&config)?;
    let generated_at = Local::now().naive_local();
    let written = render_outputs(&dataset, &config, generated_at, args.dry_run)?;
    Ok(RenderOutcome {
        dataset,
        written,
        dry_run: args.dry_run,
    })
}

/// Writes (or plans, when `dry_run`) every configured output.
pub fn render_outputs(
    dataset: &PreparedDataset,
    config: &PipelineConfig,
    generated_at: NaiveDateTime,
    dry_run: bool,
) -> Result<Vec<WrittenOutput>> {
    let span = info_span!("render", dry_run, dir = %config.output.dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let written = if dry_run {
        plan_outputs(dataset, &config.output, &config.render, generated_at)
            .context("plan outputs")?
    } else {
        write_outputs(dataset, &config.output, &config.render, generated_at)
            .context("write outputs")?
    };
    info!(
        outputs = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "render complete"
    );
    Ok(written)
}

pub fn run_check(args: &CheckArgs, mut config: PipelineConfig) -> Result<PreparedDataset> {
    args.pipeline.apply(&mut config);
    prepare(&config)
}

pub fn run_employers(args: &PipelineArgs, mut config: PipelineConfig) -> Result<PreparedDataset> {
    args.apply(&mut config);
    prepare(&config)
}

fn prepare(config: &PipelineConfig) -> Result<PreparedDataset> {
    let input = input_path(config)?;
    prepare_dataset(&input, config).with_context(|| format!("prepare {}", input.display()))
}

fn input_path(config: &PipelineConfig) -> Result<PathBuf> {
    config.input_path.clone().ok_or_else(|| {
        anyhow!("no input file given (pass INPUT or set input_path in the configuration file)")
    })
}
