pub mod csv_source;
pub mod source;

pub use csv_source::{CsvRecordSource, read_survey_csv};
pub use source::{RecordSource, SourceError};
