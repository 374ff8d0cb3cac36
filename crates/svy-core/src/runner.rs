//! Convenience wiring from a run configuration document to a persisted
//! run: load standards, fetch from the file-backed source, process every
//! survey, archive the outputs.

use anyhow::{Context, Result};
use chrono::Utc;

use svy_ingest::CsvRecordSource;
use svy_report::{ArchiveLocations, PersistedArtifacts, persist_run};
use svy_standards::{RunConfig, default_standards_root, load_standards};

use crate::pipeline::{RunOutput, run_pipeline};
use crate::summary::summary_table;

/// Outcome of a configured run: in-memory outputs plus the paths written.
#[derive(Debug)]
pub struct RunReport {
    pub output: RunOutput,
    pub artifacts: PersistedArtifacts,
}

pub fn run_from_config(config: &RunConfig) -> Result<RunReport> {
    let standards_root = config
        .paths
        .standards_dir
        .clone()
        .unwrap_or_else(default_standards_root);
    let standards = load_standards(&standards_root)
        .with_context(|| format!("load standards from {}", standards_root.display()))?;

    let source = CsvRecordSource::new(&config.paths.source_dir);
    let run_started = Utc::now();
    let output = run_pipeline(
        &config.run.surveys,
        &source,
        &standards.dictionaries,
        &standards.mappings,
        &standards.taxonomy,
        config.pipeline_options(),
        run_started,
    )
    .context("run pipeline")?;

    let summary = summary_table(&output.summaries);
    let locations = ArchiveLocations {
        archive_dir: config.paths.archive_dir.clone(),
        current_dir: config.paths.current_dir.clone(),
    };
    let artifacts = persist_run(
        output.combined_all.as_ref(),
        output.combined_ltr_drivers.as_ref(),
        &summary,
        &locations,
        &run_started,
    )
    .context("persist run artifacts")?;

    Ok(RunReport { output, artifacts })
}
