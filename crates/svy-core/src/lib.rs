pub mod aggregate;
pub mod logging;
pub mod pipeline;
pub mod runner;
pub mod summary;

pub use aggregate::{combine, extract_ltr_and_drivers, has_category};
pub use logging::{LogConfig, LogFormat, REDACTED_VALUE, init_logging, redact_value};
pub use pipeline::{RunOutput, SurveyOutcome, process_survey, run_pipeline};
pub use runner::{RunReport, run_from_config};
pub use summary::summary_table;
