use std::collections::BTreeMap;

/// Per-survey declaration of which columns use which named dictionary,
/// plus default column rules applied across all surveys.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SurveyMappingConfig {
    surveys: BTreeMap<String, BTreeMap<String, String>>,
    default_mappings: BTreeMap<String, String>,
}

impl SurveyMappingConfig {
    pub fn new(
        surveys: BTreeMap<String, BTreeMap<String, String>>,
        default_mappings: BTreeMap<String, String>,
    ) -> Self {
        Self {
            surveys,
            default_mappings,
        }
    }

    pub fn survey_names(&self) -> Vec<&str> {
        self.surveys.keys().map(String::as_str).collect()
    }

    pub fn default_mappings(&self) -> &BTreeMap<String, String> {
        &self.default_mappings
    }

    /// Column -> dictionary-name rules configured specifically for the
    /// survey. Empty when the survey has no explicit configuration.
    pub fn explicit_mappings(&self, survey_name: &str) -> BTreeMap<String, String> {
        self.surveys.get(survey_name).cloned().unwrap_or_default()
    }

    /// Explicit mappings merged with default rules.
    ///
    /// A default rule is applied only when the column is present in the
    /// data, is not already explicitly configured for this survey, and
    /// `include_defaults` is set. Explicit configuration always wins.
    pub fn effective_mappings(
        &self,
        survey_name: &str,
        present_columns: &[String],
        include_defaults: bool,
    ) -> BTreeMap<String, String> {
        let mut mappings = self.explicit_mappings(survey_name);
        if include_defaults {
            for (column, dictionary) in &self.default_mappings {
                if present_columns.contains(column) && !mappings.contains_key(column) {
                    mappings.insert(column.clone(), dictionary.clone());
                }
            }
        }
        mappings
    }

    /// Every dictionary name referenced by any survey or default rule,
    /// with one referencing (survey, column) site each for error reporting.
    pub fn referenced_dictionaries(&self) -> Vec<(String, String, String)> {
        let mut references = Vec::new();
        for (survey, columns) in &self.surveys {
            for (column, dictionary) in columns {
                references.push((survey.clone(), column.clone(), dictionary.clone()));
            }
        }
        for (column, dictionary) in &self.default_mappings {
            references.push(("default_mappings".to_string(), column.clone(), dictionary.clone()));
        }
        references
    }
}
