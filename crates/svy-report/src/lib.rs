pub mod archiver;
pub mod csv_out;

pub use archiver::{
    ArchiveLocations, COMBINED_ALL_NAME, COMBINED_LTR_NAME, PersistedArtifacts, SUMMARY_NAME,
    persist_run,
};
pub use csv_out::write_table_csv;
