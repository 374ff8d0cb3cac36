pub mod category;
pub mod dictionary;
pub mod mapping;
pub mod options;
pub mod processing;
pub mod table;

pub use category::{ColumnCategory, ColumnTaxonomy};
pub use dictionary::{DictionaryStore, MappingDictionary, normalize_label};
pub use mapping::SurveyMappingConfig;
pub use options::{PipelineOptions, ValidationPolicy};
pub use processing::{ProcessingSummary, RunStatus};
pub use table::{BOOKKEEPING_COLUMNS, CellValue, SurveyTable, is_bookkeeping_column};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_matches_summary_vocabulary() {
        assert_eq!(RunStatus::Success.to_string(), "Success");
        assert_eq!(RunStatus::NoData.to_string(), "NoData");
        assert_eq!(RunStatus::FailedToLoad.to_string(), "FailedToLoad");
        assert_eq!(
            RunStatus::Error("column validation failed".to_string()).to_string(),
            "Error: column validation failed"
        );
    }

    #[test]
    fn category_parses_config_spelling() {
        assert_eq!(ColumnCategory::parse("LTR"), Some(ColumnCategory::Ltr));
        assert_eq!(
            ColumnCategory::parse(" drivers "),
            Some(ColumnCategory::Drivers)
        );
        assert_eq!(ColumnCategory::parse("UNKNOWN"), None);
    }

    #[test]
    fn summary_serializes() {
        let summary = ProcessingSummary {
            survey_name: "customer_pulse_2024".to_string(),
            records_processed: 42,
            column_count: 7,
            columns_transformed: 3,
            has_ltr: true,
            has_drivers: true,
            status: RunStatus::Success,
            processed_at: "2024-06-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&summary).expect("serialize summary");
        let round: ProcessingSummary =
            serde_json::from_str(&json).expect("deserialize summary");
        assert_eq!(round, summary);
    }
}
