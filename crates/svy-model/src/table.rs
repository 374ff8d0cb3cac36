#![deny(unsafe_code)]

/// Columns appended by the pipeline itself. They identify the originating
/// survey and processing date and are exempt from taxonomy validation.
pub const BOOKKEEPING_COLUMNS: [&str; 2] = ["Survey_Name", "Processed_Date"];

/// Returns true for the pipeline's own bookkeeping columns.
pub fn is_bookkeeping_column(name: &str) -> bool {
    BOOKKEEPING_COLUMNS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Renders the cell for tabular output. Missing becomes an empty field;
    /// integral numbers are rendered without a fractional part.
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => {
                if value.fract() == 0.0 {
                    format!("{value:.0}")
                } else {
                    value.to_string()
                }
            }
            CellValue::Missing => String::new(),
        }
    }
}

/// One survey's rows at a point in the pipeline.
///
/// Rows are positionally aligned with `columns`; `push_row` callers must
/// supply one cell per column.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurveyTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SurveyTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Appends a column, filling existing rows with `Missing`. Returns the
    /// column index; an already-present column is left untouched.
    pub fn add_column(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(index) = self.column_index(&name) {
            return index;
        }
        self.columns.push(name);
        for row in &mut self.rows {
            row.push(CellValue::Missing);
        }
        self.columns.len() - 1
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// All values of a named column, in row order.
    pub fn column_values(&self, name: &str) -> Vec<&CellValue> {
        match self.column_index(name) {
            Some(index) => self.rows.iter().filter_map(|row| row.get(index)).collect(),
            None => Vec::new(),
        }
    }
}
