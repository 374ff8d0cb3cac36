use std::collections::BTreeMap;

/// Normalizes a response label for dictionary lookup: surrounding
/// whitespace is trimmed and the text is case-folded.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A named mapping from normalized response labels to numeric scale values.
///
/// Dictionaries are defined once with canonical-case keys and matched
/// case-insensitively; keys are normalized at construction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MappingDictionary {
    name: String,
    entries: BTreeMap<String, f64>,
}

impl MappingDictionary {
    pub fn new(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (String, f64)>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(label, value)| (normalize_label(&label), value))
            .collect();
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a raw response text, normalizing it first.
    pub fn lookup(&self, raw: &str) -> Option<f64> {
        self.entries.get(&normalize_label(raw)).copied()
    }
}

/// The immutable set of named dictionaries available to a run.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct DictionaryStore {
    dictionaries: BTreeMap<String, MappingDictionary>,
}

impl DictionaryStore {
    pub fn new(dictionaries: impl IntoIterator<Item = MappingDictionary>) -> Self {
        let dictionaries = dictionaries
            .into_iter()
            .map(|dictionary| (dictionary.name().to_string(), dictionary))
            .collect();
        Self { dictionaries }
    }

    pub fn get(&self, name: &str) -> Option<&MappingDictionary> {
        self.dictionaries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dictionaries.contains_key(name)
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.dictionaries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }
}
