//! Tabular form of the processing summary for persistence.

use svy_model::{CellValue, ProcessingSummary, SurveyTable};

const SUMMARY_COLUMNS: [&str; 8] = [
    "Survey_Name",
    "Records_Processed",
    "Column_Count",
    "Columns_Transformed",
    "Has_LTR",
    "Has_Drivers",
    "Status",
    "Processed_At",
];

/// Builds the processing-summary dataset, one row per attempted survey in
/// processing order.
pub fn summary_table(summaries: &[ProcessingSummary]) -> SurveyTable {
    let columns = SUMMARY_COLUMNS.iter().map(|c| (*c).to_string()).collect();
    let mut table = SurveyTable::new("processing_summary", columns);
    for summary in summaries {
        table.push_row(vec![
            CellValue::Text(summary.survey_name.clone()),
            CellValue::Number(summary.records_processed as f64),
            CellValue::Number(summary.column_count as f64),
            CellValue::Number(summary.columns_transformed as f64),
            CellValue::Text(summary.has_ltr.to_string()),
            CellValue::Text(summary.has_drivers.to_string()),
            CellValue::Text(summary.status.to_string()),
            CellValue::Text(summary.processed_at.clone()),
        ]);
    }
    table
}
