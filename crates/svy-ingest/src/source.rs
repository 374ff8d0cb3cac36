use svy_model::SurveyTable;

/// The record source failed to produce rows for a survey. Recorded by the
/// pipeline, which skips the survey and continues the run.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no records found for survey {survey}")]
    NotFound { survey: String },

    #[error("failed to read records for survey {survey}: {source}")]
    Io {
        survey: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed records for survey {survey}: {message}")]
    Malformed { survey: String, message: String },
}

/// Abstract source of survey rows.
///
/// Implementations own resource acquisition and must release it on every
/// exit path of `fetch`. The returned table carries the survey's own
/// columns only; bookkeeping columns are appended by the pipeline.
pub trait RecordSource {
    fn fetch(&self, survey_name: &str) -> Result<SurveyTable, SourceError>;
}
