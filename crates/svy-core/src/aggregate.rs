//! Aggregation of validated, transformed survey tables.

use svy_model::{CellValue, ColumnCategory, ColumnTaxonomy, SurveyTable};

const KEY_METRIC_CATEGORIES: [ColumnCategory; 3] = [
    ColumnCategory::Standard,
    ColumnCategory::Ltr,
    ColumnCategory::Drivers,
];

/// True when any column of the table carries the given category.
pub fn has_category(
    table: &SurveyTable,
    taxonomy: &ColumnTaxonomy,
    category: ColumnCategory,
) -> bool {
    table
        .columns
        .iter()
        .any(|column| taxonomy.category_of(column) == Some(category))
}

/// Projects the key-metrics subset: standard, LTR, and driver columns plus
/// any present bookkeeping columns. Returns `None` when the table carries
/// neither an LTR nor a drivers column; such a survey is excluded from the
/// LTR/driver combined output but still appears in the full one.
pub fn extract_ltr_and_drivers(
    table: &SurveyTable,
    taxonomy: &ColumnTaxonomy,
) -> Option<SurveyTable> {
    let has_ltr = has_category(table, taxonomy, ColumnCategory::Ltr);
    let has_drivers = has_category(table, taxonomy, ColumnCategory::Drivers);
    if !has_ltr && !has_drivers {
        return None;
    }

    let keep: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| taxonomy.in_categories(column, &KEY_METRIC_CATEGORIES))
        .map(|(index, _)| index)
        .collect();

    let columns = keep.iter().map(|&index| table.columns[index].clone()).collect();
    let mut projected = SurveyTable::new(table.name.clone(), columns);
    for row in &table.rows {
        projected.push_row(keep.iter().map(|&index| row[index].clone()).collect());
    }
    Some(projected)
}

/// Row-wise union across an ordered sequence of tables.
///
/// The result's column set is the first-seen-order union of all inputs'
/// columns; a row lacking a column holds the missing marker. No sorting,
/// deduplication, or identifier-uniqueness enforcement happens here.
pub fn combine(name: &str, tables: &[SurveyTable]) -> SurveyTable {
    let mut combined = SurveyTable::new(name, Vec::new());
    for table in tables {
        for column in &table.columns {
            combined.add_column(column.clone());
        }
    }

    for table in tables {
        let indices: Vec<Option<usize>> = combined
            .columns
            .iter()
            .map(|column| table.column_index(column))
            .collect();
        for row in &table.rows {
            let cells = indices
                .iter()
                .map(|index| match index {
                    Some(index) => row[*index].clone(),
                    None => CellValue::Missing,
                })
                .collect();
            combined.push_row(cells);
        }
    }
    combined
}
