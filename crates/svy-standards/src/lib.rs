pub mod error;
pub mod loaders;
pub mod run_config;

pub use error::{ConfigError, Result};
pub use loaders::{
    StandardsBundle, default_standards_root, load_default_dictionaries,
    load_default_survey_mappings, load_default_taxonomy, load_dictionaries, load_standards,
    load_survey_mappings, load_taxonomy, verify_mappings,
};
pub use run_config::RunConfig;
