/// Column validation policy.
///
/// Strict is the production behavior: one unrecognized column excludes the
/// whole survey from aggregation. Permissive reports unrecognized columns
/// but lets the survey through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    #[default]
    Strict,
    Permissive,
}

/// Options for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PipelineOptions {
    /// Whether default column rules are merged into survey mappings.
    pub include_defaults: bool,
    pub policy: ValidationPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            include_defaults: true,
            policy: ValidationPolicy::Strict,
        }
    }
}
