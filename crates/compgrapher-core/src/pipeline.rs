//! Dataset preparation: extract → assemble → select → validate → aggregate.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span};

use compgrapher_ingest::{Extraction, extract_rows};
use compgrapher_model::{Issue, PipelineConfig, PreparedDataset, normalize_key};
use compgrapher_validate::{resolve_highlight, validate};

use crate::aggregate::aggregate_positions;
use crate::assemble::assemble_positions;
use crate::error::Result;
use crate::select::{Selection, select_positions};

/// Reads `path` and prepares the dataset handed to rendering.
///
/// Structural and identity errors stop the run. Data-quality issues are
/// collected in the returned dataset's report.
pub fn prepare_dataset(path: &Path, config: &PipelineConfig) -> Result<PreparedDataset> {
    let span = info_span!("prepare_dataset", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let extraction = info_span!("extract").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let extraction = extract_rows(path, &config.bad_column_keys())?;
        info!(
            employer_count = extraction.employers.len(),
            row_count = extraction.rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "extraction complete"
        );
        Ok(extraction)
    })?;

    let dataset = prepare_extracted(extraction, config)?;
    info!(
        position_count = dataset.positions.len(),
        warning_count = dataset.report.len(),
        duration_ms = start.elapsed().as_millis(),
        "dataset prepared"
    );
    Ok(dataset)
}

/// Runs every stage after extraction.
pub fn prepare_extracted(extraction: Extraction, config: &PipelineConfig) -> Result<PreparedDataset> {
    let Extraction {
        source,
        employers,
        rows,
    } = extraction;

    let assembly = info_span!("assemble").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let assembly = assemble_positions(&rows, &employers)?;
        info!(
            pair_count = rows.len() / 2,
            position_count = assembly.positions.len(),
            queued_issues = assembly.issues.len(),
            duration_ms = start.elapsed().as_millis(),
            "assembly complete"
        );
        Ok(assembly)
    })?;

    let selection = info_span!("select").in_scope(|| {
        let selection = select_positions(
            assembly.positions,
            &config.excluded_position_keys(),
            config.drop_top_paid,
        );
        info!(
            kept = selection.positions.len(),
            excluded = selection.excluded.len(),
            dropped = selection.dropped.len(),
            "selection complete"
        );
        selection
    });
    let queued = without_removed_positions(assembly.issues, &selection);
    let positions = selection.positions;

    let (highlighted, report) = info_span!("validate").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let highlighted =
            resolve_highlight(&employers, config.highlighted_employer.as_deref())?;
        let report = validate(&positions, &employers, queued);
        info!(
            highlighted = %highlighted.name,
            warning_count = report.len(),
            duration_ms = start.elapsed().as_millis(),
            "validation stage complete"
        );
        Ok((highlighted, report))
    })?;

    let (stats, gaps) = info_span!("aggregate").in_scope(|| {
        let start = Instant::now();
        let (stats, gaps) = aggregate_positions(&positions);
        info!(
            stats_count = stats.len(),
            gap_count = gaps.len(),
            duration_ms = start.elapsed().as_millis(),
            "aggregation complete"
        );
        (stats, gaps)
    });

    Ok(PreparedDataset {
        source,
        employers,
        highlighted,
        positions,
        stats,
        gaps,
        report,
    })
}

/// Drops queued issues about positions that selection removed.
fn without_removed_positions(issues: Vec<Issue>, selection: &Selection) -> Vec<Issue> {
    let removed: BTreeSet<String> = selection
        .excluded
        .iter()
        .chain(&selection.dropped)
        .map(|title| normalize_key(title))
        .collect();
    if removed.is_empty() {
        return issues;
    }
    issues
        .into_iter()
        .filter(|issue| {
            issue
                .position()
                .is_none_or(|position| !removed.contains(&normalize_key(position)))
        })
        .collect()
}
