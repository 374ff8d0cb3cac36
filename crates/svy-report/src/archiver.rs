//! Run artifact persistence.
//!
//! Every output dataset is written twice: a timestamp-suffixed archive copy
//! that is never overwritten, and a fixed-name "current" copy replaced on
//! each run. The current copy is replaced atomically (written to a
//! temporary path in the same directory, then renamed into place) so
//! readers never observe a partially written file. Archive growth is the
//! caller's operational concern.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use svy_model::SurveyTable;

use crate::csv_out::write_table_csv;

pub const COMBINED_ALL_NAME: &str = "combined_all_surveys";
pub const COMBINED_LTR_NAME: &str = "combined_ltr_drivers";
pub const SUMMARY_NAME: &str = "processing_summary";

#[derive(Debug, Clone)]
pub struct ArchiveLocations {
    pub archive_dir: PathBuf,
    pub current_dir: PathBuf,
}

/// Paths written by one persist call.
#[derive(Debug, Clone, Default)]
pub struct PersistedArtifacts {
    pub archive: Vec<PathBuf>,
    pub current: Vec<PathBuf>,
}

/// Persists the run outputs.
///
/// The processing summary is always written; the two combined datasets are
/// omitted when no survey succeeded (there is no schema to write headers
/// from).
pub fn persist_run(
    full: Option<&SurveyTable>,
    ltr_drivers: Option<&SurveyTable>,
    summary: &SurveyTable,
    locations: &ArchiveLocations,
    run_timestamp: &DateTime<Utc>,
) -> Result<PersistedArtifacts> {
    std::fs::create_dir_all(&locations.archive_dir)
        .with_context(|| format!("create archive dir: {}", locations.archive_dir.display()))?;
    std::fs::create_dir_all(&locations.current_dir)
        .with_context(|| format!("create current dir: {}", locations.current_dir.display()))?;

    let suffix = run_timestamp.format("%Y%m%d_%H%M%S").to_string();
    let mut artifacts = PersistedArtifacts::default();

    let datasets = [
        (COMBINED_ALL_NAME, full),
        (COMBINED_LTR_NAME, ltr_drivers),
        (SUMMARY_NAME, Some(summary)),
    ];
    for (name, table) in datasets {
        let Some(table) = table else {
            info!(dataset = name, "no rows this run; dataset omitted");
            continue;
        };
        let archive_path = locations.archive_dir.join(format!("{name}_{suffix}.csv"));
        write_table_csv(table, &archive_path)?;
        artifacts.archive.push(archive_path);

        let current_path = replace_current(table, &locations.current_dir, name)?;
        artifacts.current.push(current_path);

        info!(dataset = name, rows = table.height(), "persisted dataset");
    }

    Ok(artifacts)
}

/// Writes the fixed-name current copy via a same-directory temporary file
/// and an atomic rename.
fn replace_current(table: &SurveyTable, current_dir: &Path, name: &str) -> Result<PathBuf> {
    let final_path = current_dir.join(format!("{name}.csv"));
    let temp_path = current_dir.join(format!(".{name}.csv.tmp"));
    write_table_csv(table, &temp_path)?;
    std::fs::rename(&temp_path, &final_path).with_context(|| {
        format!(
            "replace current dataset: {} -> {}",
            temp_path.display(),
            final_path.display()
        )
    })?;
    Ok(final_path)
}
