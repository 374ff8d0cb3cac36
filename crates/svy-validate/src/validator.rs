//! Column taxonomy validation.
//!
//! Validation is all-or-nothing per survey under the strict policy: a
//! single unrecognized column excludes the whole survey from aggregation
//! for the run, keeping the combined outputs schema-consistent. Callers
//! decide (and log) that the survey was skipped.

use std::collections::BTreeSet;

use svy_model::{ColumnTaxonomy, SurveyTable, ValidationPolicy, is_bookkeeping_column};

/// Result of checking one dataset against the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnValidation {
    pub is_valid: bool,
    /// Dataset columns (bookkeeping excluded) absent from the taxonomy.
    pub unrecognized: BTreeSet<String>,
}

impl ColumnValidation {
    pub fn describe(&self) -> String {
        let columns: Vec<&str> = self.unrecognized.iter().map(String::as_str).collect();
        format!("unrecognized columns: {}", columns.join(", "))
    }
}

/// Checks every dataset column against the taxonomy. Bookkeeping columns
/// added by the pipeline are exempt.
pub fn validate_columns(
    table: &SurveyTable,
    taxonomy: &ColumnTaxonomy,
    policy: ValidationPolicy,
) -> ColumnValidation {
    let unrecognized: BTreeSet<String> = table
        .columns
        .iter()
        .filter(|column| !is_bookkeeping_column(column) && !taxonomy.is_known(column))
        .cloned()
        .collect();

    let is_valid = match policy {
        ValidationPolicy::Strict => unrecognized.is_empty(),
        ValidationPolicy::Permissive => true,
    };

    ColumnValidation {
        is_valid,
        unrecognized,
    }
}
