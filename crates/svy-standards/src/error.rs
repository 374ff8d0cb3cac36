#![deny(unsafe_code)]

use std::path::PathBuf;

/// Malformed or missing configuration. Fatal at startup: the pipeline
/// cannot run without a valid configuration set.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse TOML run config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid dictionary {name}: {message}")]
    InvalidDictionary { name: String, message: String },

    #[error("unknown taxonomy category {value} for column {column}")]
    UnknownCategory { column: String, value: String },

    #[error("unknown dictionary {dictionary} referenced by {survey} column {column}")]
    UnknownDictionary {
        survey: String,
        column: String,
        dictionary: String,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
