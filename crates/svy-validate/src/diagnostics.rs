//! Dataset diagnostics: checked and reported, never enforced.

use std::collections::BTreeSet;

use tracing::warn;

use svy_model::SurveyTable;

const RESPONSE_ID_COLUMN: &str = "ResponseID";

/// Counts duplicate response identifiers (occurrences beyond the first).
/// The identifier should be unique per row within one survey; this is a
/// diagnostic only.
pub fn duplicate_response_ids(table: &SurveyTable) -> usize {
    let mut seen = BTreeSet::new();
    let mut duplicates = 0usize;
    for cell in table.column_values(RESPONSE_ID_COLUMN) {
        if cell.is_missing() {
            continue;
        }
        if !seen.insert(cell.render()) {
            duplicates += 1;
        }
    }
    duplicates
}

/// Runs the diagnostics and logs findings. Returns the duplicate count so
/// callers can surface it in their own reporting.
pub fn report_diagnostics(table: &SurveyTable, survey_name: &str) -> usize {
    let duplicates = duplicate_response_ids(table);
    if duplicates > 0 {
        warn!(
            survey = survey_name,
            duplicates, "duplicate response identifiers in survey data"
        );
    }
    duplicates
}
