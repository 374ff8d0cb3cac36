//! The TOML run configuration document.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use svy_model::{PipelineOptions, ValidationPolicy};

use crate::error::{ConfigError, Result};

/// Declares which surveys a run processes and where its inputs and outputs
/// live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub run: RunSection,
    pub paths: PathsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSection {
    /// Survey names, in processing order.
    pub surveys: Vec<String>,
    #[serde(default = "default_include_defaults")]
    pub include_defaults: bool,
    #[serde(default)]
    pub validation: ValidationPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    /// Standards root override; the env var / manifest fallback applies
    /// when absent.
    #[serde(default)]
    pub standards_dir: Option<PathBuf>,
    /// Directory the file-backed record source reads from.
    pub source_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub current_dir: PathBuf,
}

fn default_include_defaults() -> bool {
    true
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
        Self::from_str(&text, path)
    }

    pub fn from_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            include_defaults: self.run.include_defaults,
            policy: self.run.validation,
        }
    }
}
