//! Loaders for the shipped configuration documents.
//!
//! The standards root holds three JSON documents: mapping dictionaries,
//! per-survey column mappings, and the column taxonomy. Custom dictionaries
//! and surveys are added by editing the documents, not the code.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use svy_model::{
    ColumnCategory, ColumnTaxonomy, DictionaryStore, MappingDictionary, SurveyMappingConfig,
};

use crate::error::{ConfigError, Result};

const STANDARDS_ENV_VAR: &str = "SURVEY_STANDARDS_DIR";

const DICTIONARIES_FILE: &str = "mapping_dictionaries.json";
const SURVEY_MAPPINGS_FILE: &str = "survey_column_mappings.json";
const TAXONOMY_FILE: &str = "column_taxonomy.json";

/// Get the default standards root directory.
pub fn default_standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

pub fn load_default_dictionaries() -> Result<DictionaryStore> {
    load_dictionaries(&default_standards_root().join(DICTIONARIES_FILE))
}

pub fn load_default_survey_mappings() -> Result<SurveyMappingConfig> {
    load_survey_mappings(&default_standards_root().join(SURVEY_MAPPINGS_FILE))
}

pub fn load_default_taxonomy() -> Result<ColumnTaxonomy> {
    load_taxonomy(&default_standards_root().join(TAXONOMY_FILE))
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))
}

#[derive(Debug, Deserialize)]
struct DictionariesDoc {
    dictionaries: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

/// Loads the named dictionaries from a `{ "dictionaries": { name: { label:
/// number } } }` document. Labels are normalized at load; values must be
/// numeric.
pub fn load_dictionaries(path: &Path) -> Result<DictionaryStore> {
    let text = read_to_string(path)?;
    let doc: DictionariesDoc = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut dictionaries = Vec::with_capacity(doc.dictionaries.len());
    for (name, raw_entries) in doc.dictionaries {
        let mut entries = Vec::with_capacity(raw_entries.len());
        for (label, value) in raw_entries {
            let number = value
                .as_f64()
                .ok_or_else(|| ConfigError::InvalidDictionary {
                    name: name.clone(),
                    message: format!("value for label {label:?} is not a number"),
                })?;
            entries.push((label, number));
        }
        if entries.is_empty() {
            return Err(ConfigError::InvalidDictionary {
                name,
                message: "dictionary has no entries".to_string(),
            });
        }
        dictionaries.push(MappingDictionary::new(name, entries));
    }
    Ok(DictionaryStore::new(dictionaries))
}

#[derive(Debug, Deserialize)]
struct SurveyEntry {
    #[serde(default)]
    columns: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SurveyMappingsDoc {
    #[serde(default)]
    surveys: BTreeMap<String, SurveyEntry>,
    #[serde(default)]
    default_mappings: BTreeMap<String, String>,
}

/// Loads the per-survey column mappings plus the global default rules.
pub fn load_survey_mappings(path: &Path) -> Result<SurveyMappingConfig> {
    let text = read_to_string(path)?;
    let doc: SurveyMappingsDoc =
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let surveys = doc
        .surveys
        .into_iter()
        .map(|(name, entry)| (name, entry.columns))
        .collect();
    Ok(SurveyMappingConfig::new(surveys, doc.default_mappings))
}

/// Loads the column taxonomy from a `{ column: category }` document.
pub fn load_taxonomy(path: &Path) -> Result<ColumnTaxonomy> {
    let text = read_to_string(path)?;
    let raw: BTreeMap<String, String> =
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let mut entries = BTreeMap::new();
    for (column, value) in raw {
        let category =
            ColumnCategory::parse(&value).ok_or_else(|| ConfigError::UnknownCategory {
                column: column.clone(),
                value: value.clone(),
            })?;
        entries.insert(column, category);
    }
    Ok(ColumnTaxonomy::new(entries))
}

/// The full configuration set a pipeline run needs.
#[derive(Debug, Clone)]
pub struct StandardsBundle {
    pub dictionaries: DictionaryStore,
    pub mappings: SurveyMappingConfig,
    pub taxonomy: ColumnTaxonomy,
}

/// Loads and cross-verifies all three configuration documents from a
/// standards root. Any failure is fatal: the pipeline cannot run without
/// a valid configuration set.
pub fn load_standards(root: &Path) -> Result<StandardsBundle> {
    let dictionaries = load_dictionaries(&root.join(DICTIONARIES_FILE))?;
    let mappings = load_survey_mappings(&root.join(SURVEY_MAPPINGS_FILE))?;
    let taxonomy = load_taxonomy(&root.join(TAXONOMY_FILE))?;
    verify_mappings(&mappings, &dictionaries)?;
    Ok(StandardsBundle {
        dictionaries,
        mappings,
        taxonomy,
    })
}

/// Verifies that every dictionary referenced by the mapping config exists
/// in the store. Run once at startup so the transform path cannot hit an
/// unknown dictionary mid-run.
pub fn verify_mappings(config: &SurveyMappingConfig, store: &DictionaryStore) -> Result<()> {
    for (survey, column, dictionary) in config.referenced_dictionaries() {
        if !store.contains(&dictionary) {
            return Err(ConfigError::UnknownDictionary {
                survey,
                column,
                dictionary,
            });
        }
    }
    Ok(())
}
