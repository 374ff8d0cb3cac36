use std::collections::BTreeMap;

/// What happened to one configured column during transformation.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnTransformStats {
    /// Dictionary applied to the column.
    pub dictionary: String,
    /// Values replaced by their numeric mapping.
    pub converted: usize,
    /// Distinct textual values that matched no dictionary entry and were
    /// passed through unchanged, with occurrence counts.
    pub untransformed: BTreeMap<String, usize>,
}

impl ColumnTransformStats {
    pub fn untransformed_total(&self) -> usize {
        self.untransformed.values().sum()
    }
}

/// Per-survey record of the transformation pass.
///
/// Unmatched text is deliberately fail-open: it stays in the data
/// untouched. This report makes the pass-through observable so callers can
/// log or alert on it without changing the data path.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransformReport {
    pub survey_name: String,
    /// Stats per column that had a mapping applied (column was present).
    pub columns: BTreeMap<String, ColumnTransformStats>,
}

impl TransformReport {
    pub fn new(survey_name: impl Into<String>) -> Self {
        Self {
            survey_name: survey_name.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Number of columns a dictionary was applied to.
    pub fn columns_transformed(&self) -> usize {
        self.columns.len()
    }

    pub fn untransformed_total(&self) -> usize {
        self.columns
            .values()
            .map(ColumnTransformStats::untransformed_total)
            .sum()
    }

    pub fn has_untransformed(&self) -> bool {
        self.untransformed_total() > 0
    }
}
