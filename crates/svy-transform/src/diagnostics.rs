//! Configuration-versus-data diagnostics. Never blocks processing.

use std::collections::BTreeSet;

use svy_model::{SurveyMappingConfig, SurveyTable};

/// Columns owned by the pipeline or required on every survey; excluded
/// from the extra-column diagnostic.
pub const SYSTEM_COLUMNS: [&str; 4] = ["Survey_Name", "Processed_Date", "ResponseID", "Timestamp"];

/// Difference between a survey's configuration and its data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigCheck {
    /// Columns configured for the survey but absent from the data.
    pub missing: BTreeSet<String>,
    /// Data columns not covered by any explicit or default mapping.
    pub extra: BTreeSet<String>,
}

impl ConfigCheck {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compares explicit configuration and default rules against the dataset's
/// columns. Diagnostic only; a survey with zero configured columns yields
/// an empty `missing` set.
pub fn validate_survey_config(
    survey_name: &str,
    table: &SurveyTable,
    config: &SurveyMappingConfig,
) -> ConfigCheck {
    let explicit = config.explicit_mappings(survey_name);
    let present: BTreeSet<&str> = table.columns.iter().map(String::as_str).collect();

    let missing = explicit
        .keys()
        .filter(|column| !present.contains(column.as_str()))
        .cloned()
        .collect();

    let extra = table
        .columns
        .iter()
        .filter(|column| {
            !SYSTEM_COLUMNS.contains(&column.as_str())
                && !explicit.contains_key(column.as_str())
                && !config.default_mappings().contains_key(column.as_str())
        })
        .cloned()
        .collect();

    ConfigCheck { missing, extra }
}
