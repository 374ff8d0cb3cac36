use std::collections::BTreeMap;

use crate::table::is_bookkeeping_column;

/// Taxonomy category of a recognized survey column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnCategory {
    /// Identity/timing fields required on every survey.
    Standard,
    /// Likelihood-to-recommend fields.
    Ltr,
    /// Satisfaction and custom metric fields.
    Drivers,
    /// Demographics and free text.
    Metadata,
}

impl ColumnCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnCategory::Standard => "STANDARD",
            ColumnCategory::Ltr => "LTR",
            ColumnCategory::Drivers => "DRIVERS",
            ColumnCategory::Metadata => "METADATA",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "STANDARD" => Some(ColumnCategory::Standard),
            "LTR" => Some(ColumnCategory::Ltr),
            "DRIVERS" => Some(ColumnCategory::Drivers),
            "METADATA" => Some(ColumnCategory::Metadata),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColumnCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry mapping every recognized column name to its category.
///
/// A column absent from the registry is unrecognized; bookkeeping columns
/// are not registered and are handled by the validator directly.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ColumnTaxonomy {
    entries: BTreeMap<String, ColumnCategory>,
}

impl ColumnTaxonomy {
    pub fn new(entries: BTreeMap<String, ColumnCategory>) -> Self {
        Self { entries }
    }

    pub fn category_of(&self, column: &str) -> Option<ColumnCategory> {
        self.entries.get(column).copied()
    }

    pub fn is_known(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the column belongs to one of the given categories, or is a
    /// bookkeeping column (bookkeeping columns travel with every projection).
    pub fn in_categories(&self, column: &str, categories: &[ColumnCategory]) -> bool {
        if is_bookkeeping_column(column) {
            return true;
        }
        match self.category_of(column) {
            Some(category) => categories.contains(&category),
            None => false,
        }
    }
}
