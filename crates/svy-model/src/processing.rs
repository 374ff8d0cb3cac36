/// Outcome recorded for one attempted survey.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RunStatus {
    /// Rows were fetched, validated, transformed, and aggregated.
    Success,
    /// The source produced zero rows for the survey.
    NoData,
    /// The source failed to produce rows at all.
    FailedToLoad,
    /// Processing failed after load; the detail names the reason.
    Error(String),
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => f.write_str("Success"),
            RunStatus::NoData => f.write_str("NoData"),
            RunStatus::FailedToLoad => f.write_str("FailedToLoad"),
            RunStatus::Error(detail) => write!(f, "Error: {detail}"),
        }
    }
}

/// One row of the processing summary: created once per survey per run and
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessingSummary {
    pub survey_name: String,
    pub records_processed: usize,
    pub column_count: usize,
    pub columns_transformed: usize,
    pub has_ltr: bool,
    pub has_drivers: bool,
    pub status: RunStatus,
    pub processed_at: String,
}
