//! The per-survey processing pipeline.
//!
//! Stages per survey, in order: fetch records from the source, append
//! bookkeeping columns, run diagnostics, validate columns against the
//! taxonomy, apply dictionary transformations, and project the key-metrics
//! subset. Expected failures (no data, source failure, validation failure)
//! are values carried in the survey's outcome, not control flow; one
//! survey's failure never interrupts the rest of the run.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use svy_ingest::RecordSource;
use svy_model::{
    CellValue, ColumnCategory, ColumnTaxonomy, DictionaryStore, PipelineOptions,
    ProcessingSummary, RunStatus, SurveyMappingConfig, SurveyTable, BOOKKEEPING_COLUMNS,
};
use svy_standards::{ConfigError, verify_mappings};
use svy_transform::{transform_survey, validate_survey_config};
use svy_validate::{report_diagnostics, validate_columns};

use crate::aggregate::{combine, extract_ltr_and_drivers, has_category};
use crate::logging::redact_value;

/// Everything produced for one attempted survey.
#[derive(Debug)]
pub struct SurveyOutcome {
    pub summary: ProcessingSummary,
    /// The validated, transformed dataset; absent when the survey was
    /// skipped.
    pub table: Option<SurveyTable>,
    /// The key-metrics projection; absent when the survey was skipped or
    /// carries neither LTR nor driver columns.
    pub ltr_drivers: Option<SurveyTable>,
}

/// The aggregate artifacts of one run.
#[derive(Debug)]
pub struct RunOutput {
    /// Union of every validated survey; `None` when no survey succeeded.
    pub combined_all: Option<SurveyTable>,
    /// Union of the key-metrics projections; `None` when no eligible
    /// survey succeeded.
    pub combined_ltr_drivers: Option<SurveyTable>,
    /// One entry per attempted survey, in processing order.
    pub summaries: Vec<ProcessingSummary>,
}

fn append_bookkeeping(table: &mut SurveyTable, survey_name: &str, processed_date: &str) {
    let [survey_column, date_column] = BOOKKEEPING_COLUMNS;
    let survey_index = table.add_column(survey_column);
    let date_index = table.add_column(date_column);
    for row in &mut table.rows {
        row[survey_index] = CellValue::Text(survey_name.to_string());
        row[date_index] = CellValue::Text(processed_date.to_string());
    }
}

fn summary_row(
    survey_name: &str,
    status: RunStatus,
    table: Option<&SurveyTable>,
    taxonomy: &ColumnTaxonomy,
    columns_transformed: usize,
    processed_at: &DateTime<Utc>,
) -> ProcessingSummary {
    let (records, columns, has_ltr, has_drivers) = match table {
        Some(table) => (
            table.height(),
            table.width(),
            has_category(table, taxonomy, ColumnCategory::Ltr),
            has_category(table, taxonomy, ColumnCategory::Drivers),
        ),
        None => (0, 0, false, false),
    };
    ProcessingSummary {
        survey_name: survey_name.to_string(),
        records_processed: records,
        column_count: columns,
        columns_transformed,
        has_ltr,
        has_drivers,
        status,
        processed_at: processed_at.to_rfc3339(),
    }
}

/// Processes one survey end to end. Always returns an outcome; failures
/// are recorded in the summary row.
pub fn process_survey(
    survey_name: &str,
    source: &dyn RecordSource,
    store: &DictionaryStore,
    mappings: &SurveyMappingConfig,
    taxonomy: &ColumnTaxonomy,
    options: PipelineOptions,
    processed_at: &DateTime<Utc>,
) -> SurveyOutcome {
    info!(survey = survey_name, "processing survey");

    let mut table = match source.fetch(survey_name) {
        Ok(table) => table,
        Err(error) => {
            warn!(survey = survey_name, %error, "record source failed");
            return SurveyOutcome {
                summary: summary_row(
                    survey_name,
                    RunStatus::FailedToLoad,
                    None,
                    taxonomy,
                    0,
                    processed_at,
                ),
                table: None,
                ltr_drivers: None,
            };
        }
    };

    if table.is_empty() {
        info!(survey = survey_name, "no records returned");
        return SurveyOutcome {
            summary: summary_row(survey_name, RunStatus::NoData, None, taxonomy, 0, processed_at),
            table: None,
            ltr_drivers: None,
        };
    }

    append_bookkeeping(&mut table, survey_name, &processed_at.format("%Y-%m-%d").to_string());
    report_diagnostics(&table, survey_name);

    let validation = validate_columns(&table, taxonomy, options.policy);
    if !validation.is_valid {
        warn!(
            survey = survey_name,
            detail = %validation.describe(),
            "survey excluded from aggregation"
        );
        return SurveyOutcome {
            summary: summary_row(
                survey_name,
                RunStatus::Error("column validation failed".to_string()),
                Some(&table),
                taxonomy,
                0,
                processed_at,
            ),
            table: None,
            ltr_drivers: None,
        };
    }

    let config_check = validate_survey_config(survey_name, &table, mappings);
    if !config_check.is_clean() {
        debug!(
            survey = survey_name,
            missing = ?config_check.missing,
            extra = ?config_check.extra,
            "mapping configuration does not fully cover the data"
        );
    }

    let (transformed, report) =
        match transform_survey(&table, survey_name, store, mappings, options.include_defaults) {
            Ok(result) => result,
            Err(error) => {
                warn!(survey = survey_name, %error, "transformation failed");
                return SurveyOutcome {
                    summary: summary_row(
                        survey_name,
                        RunStatus::Error(error.to_string()),
                        Some(&table),
                        taxonomy,
                        0,
                        processed_at,
                    ),
                    table: None,
                    ltr_drivers: None,
                };
            }
        };

    for (column, stats) in &report.columns {
        if stats.untransformed.is_empty() {
            continue;
        }
        let examples: Vec<&str> = stats
            .untransformed
            .keys()
            .take(3)
            .map(|value| redact_value(value))
            .collect();
        warn!(
            survey = survey_name,
            %column,
            count = stats.untransformed_total(),
            examples = %examples.join(", "),
            "unmatched response text passed through unchanged"
        );
    }

    let ltr_drivers = extract_ltr_and_drivers(&transformed, taxonomy);
    let summary = summary_row(
        survey_name,
        RunStatus::Success,
        Some(&transformed),
        taxonomy,
        report.columns_transformed(),
        processed_at,
    );
    info!(
        survey = survey_name,
        records = summary.records_processed,
        columns_transformed = summary.columns_transformed,
        "survey processed"
    );
    SurveyOutcome {
        summary,
        table: Some(transformed),
        ltr_drivers,
    }
}

/// Runs the full pipeline over the configured survey list, sequentially
/// and in order.
///
/// Configuration errors surface immediately, before any survey is
/// processed. Per-survey failures are isolated and recorded; the summary
/// list always holds one entry per attempted survey.
pub fn run_pipeline(
    surveys: &[String],
    source: &dyn RecordSource,
    store: &DictionaryStore,
    mappings: &SurveyMappingConfig,
    taxonomy: &ColumnTaxonomy,
    options: PipelineOptions,
    run_started: DateTime<Utc>,
) -> Result<RunOutput, ConfigError> {
    verify_mappings(mappings, store)?;

    let mut full_tables = Vec::new();
    let mut ltr_tables = Vec::new();
    let mut summaries = Vec::with_capacity(surveys.len());

    for survey_name in surveys {
        let outcome = process_survey(
            survey_name,
            source,
            store,
            mappings,
            taxonomy,
            options,
            &run_started,
        );
        if let Some(table) = outcome.table {
            full_tables.push(table);
        }
        if let Some(table) = outcome.ltr_drivers {
            ltr_tables.push(table);
        }
        summaries.push(outcome.summary);
    }

    let combined_all = if full_tables.is_empty() {
        None
    } else {
        Some(combine("combined_all_surveys", &full_tables))
    };
    let combined_ltr_drivers = if ltr_tables.is_empty() {
        None
    } else {
        Some(combine("combined_ltr_drivers", &ltr_tables))
    };

    info!(
        surveys = surveys.len(),
        succeeded = summaries.iter().filter(|s| s.status.is_success()).count(),
        combined_rows = combined_all.as_ref().map_or(0, SurveyTable::height),
        "run complete"
    );
    Ok(RunOutput {
        combined_all,
        combined_ltr_drivers,
        summaries,
    })
}
