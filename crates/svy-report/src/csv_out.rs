//! CSV rendering of survey tables: UTF-8, header row, missing cells as
//! empty fields.

use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use svy_model::SurveyTable;

pub fn write_table_csv(table: &SurveyTable, path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create csv: {}", path.display()))?;

    writer
        .write_record(&table.columns)
        .with_context(|| format!("write header: {}", path.display()))?;
    for row in &table.rows {
        let record: Vec<String> = row.iter().map(svy_model::CellValue::render).collect();
        writer
            .write_record(&record)
            .with_context(|| format!("write record: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", path.display()))?;
    Ok(())
}
