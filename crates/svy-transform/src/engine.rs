//! Dictionary application over one survey's table.
//!
//! Per-value rule: missing markers are preserved, numeric values are
//! preserved (a second pass over transformed data is a no-op), and textual
//! values are normalized and looked up in the configured dictionary. A hit
//! replaces the text with the numeric value; a miss passes the original
//! text through unchanged and is tallied in the transform report.

use tracing::debug;

use svy_model::{CellValue, DictionaryStore, SurveyMappingConfig, SurveyTable};

use crate::report::{ColumnTransformStats, TransformReport};

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A mapping rule names a dictionary the store does not hold. Startup
    /// verification makes this unreachable in a configured pipeline.
    #[error("unknown dictionary {dictionary} configured for survey {survey} column {column}")]
    UnknownDictionary {
        survey: String,
        column: String,
        dictionary: String,
    },
}

/// Produces a new table in which every effectively-mapped column has its
/// textual values replaced by dictionary-resolved numeric values. Inputs
/// are not mutated.
pub fn transform_survey(
    table: &SurveyTable,
    survey_name: &str,
    store: &DictionaryStore,
    config: &SurveyMappingConfig,
    include_defaults: bool,
) -> Result<(SurveyTable, TransformReport), TransformError> {
    let mappings = config.effective_mappings(survey_name, &table.columns, include_defaults);
    let mut result = table.clone();
    let mut report = TransformReport::new(survey_name);

    for (column, dictionary_name) in mappings {
        let Some(column_index) = result.column_index(&column) else {
            debug!(survey = survey_name, %column, "configured column not in data");
            continue;
        };
        let dictionary =
            store
                .get(&dictionary_name)
                .ok_or_else(|| TransformError::UnknownDictionary {
                    survey: survey_name.to_string(),
                    column: column.clone(),
                    dictionary: dictionary_name.clone(),
                })?;

        let mut stats = ColumnTransformStats {
            dictionary: dictionary_name.clone(),
            ..ColumnTransformStats::default()
        };
        for row in &mut result.rows {
            let cell = &mut row[column_index];
            let CellValue::Text(text) = cell else {
                continue;
            };
            match dictionary.lookup(text) {
                Some(value) => {
                    *cell = CellValue::Number(value);
                    stats.converted += 1;
                }
                None => {
                    *stats.untransformed.entry(text.clone()).or_insert(0) += 1;
                }
            }
        }

        debug!(
            survey = survey_name,
            %column,
            dictionary = %dictionary_name,
            converted = stats.converted,
            untransformed = stats.untransformed_total(),
            "applied dictionary"
        );
        report.columns.insert(column, stats);
    }

    Ok((result, report))
}
