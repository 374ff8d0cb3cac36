pub mod diagnostics;
pub mod engine;
pub mod report;

pub use diagnostics::{ConfigCheck, SYSTEM_COLUMNS, validate_survey_config};
pub use engine::{TransformError, transform_survey};
pub use report::{ColumnTransformStats, TransformReport};
