//! File-per-survey CSV record source.
//!
//! Reads `<root>/<survey_name>.csv` with a header row. Cells are trimmed,
//! empty cells become `Missing`, numeric-looking cells are typed as
//! numbers so a re-run over already-transformed data is a no-op.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use svy_model::{CellValue, SurveyTable};

use crate::source::{RecordSource, SourceError};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        return CellValue::Number(number);
    }
    CellValue::Text(trimmed.to_string())
}

#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    root: PathBuf,
}

impl CsvRecordSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn survey_path(&self, survey_name: &str) -> PathBuf {
        self.root.join(format!("{survey_name}.csv"))
    }
}

impl RecordSource for CsvRecordSource {
    fn fetch(&self, survey_name: &str) -> Result<SurveyTable, SourceError> {
        let path = self.survey_path(survey_name);
        if !path.exists() {
            return Err(SourceError::NotFound {
                survey: survey_name.to_string(),
            });
        }
        read_survey_csv(&path, survey_name)
    }
}

/// Reads one survey CSV into a table. The reader is scoped to this call;
/// the file handle is released on every exit path.
pub fn read_survey_csv(path: &Path, survey_name: &str) -> Result<SurveyTable, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| malformed(survey_name, &error))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| malformed(survey_name, &error))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut table = SurveyTable::new(survey_name, headers);
    for record in reader.records() {
        let record = record.map_err(|error| malformed(survey_name, &error))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = Vec::with_capacity(table.width());
        for index in 0..table.width() {
            let value = record.get(index).unwrap_or("");
            row.push(parse_cell(value));
        }
        table.push_row(row);
    }

    debug!(
        survey = survey_name,
        rows = table.height(),
        columns = table.width(),
        "read survey csv"
    );
    Ok(table)
}

fn malformed(survey_name: &str, error: &csv::Error) -> SourceError {
    SourceError::Malformed {
        survey: survey_name.to_string(),
        message: error.to_string(),
    }
}
