//! End-to-end pipeline tests over an in-memory record source.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use svy_core::{run_from_config, run_pipeline};
use svy_ingest::{RecordSource, SourceError};
use svy_model::{
    CellValue, ColumnCategory, ColumnTaxonomy, DictionaryStore, MappingDictionary,
    PipelineOptions, RunStatus, SurveyMappingConfig, SurveyTable,
};
use svy_standards::{ConfigError, RunConfig};

struct MemorySource {
    tables: BTreeMap<String, SurveyTable>,
}

impl MemorySource {
    fn new(tables: Vec<SurveyTable>) -> Self {
        let tables = tables
            .into_iter()
            .map(|table| (table.name.clone(), table))
            .collect();
        Self { tables }
    }
}

impl RecordSource for MemorySource {
    fn fetch(&self, survey_name: &str) -> Result<SurveyTable, SourceError> {
        self.tables
            .get(survey_name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                survey: survey_name.to_string(),
            })
    }
}

fn store() -> DictionaryStore {
    DictionaryStore::new(vec![MappingDictionary::new(
        "satisfaction_5_scale",
        vec![
            ("Very Dissatisfied".to_string(), 1.0),
            ("Dissatisfied".to_string(), 2.0),
            ("Neutral".to_string(), 3.0),
            ("Satisfied".to_string(), 4.0),
            ("Very Satisfied".to_string(), 5.0),
        ],
    )])
}

fn taxonomy() -> ColumnTaxonomy {
    let mut entries = BTreeMap::new();
    entries.insert("ResponseID".to_string(), ColumnCategory::Standard);
    entries.insert("Timestamp".to_string(), ColumnCategory::Standard);
    entries.insert("NPS_Score".to_string(), ColumnCategory::Ltr);
    entries.insert("Overall_Satisfaction".to_string(), ColumnCategory::Drivers);
    entries.insert("Gender".to_string(), ColumnCategory::Metadata);
    ColumnTaxonomy::new(entries)
}

fn mappings() -> SurveyMappingConfig {
    let mut surveys = BTreeMap::new();
    let mut columns = BTreeMap::new();
    columns.insert(
        "Overall_Satisfaction".to_string(),
        "satisfaction_5_scale".to_string(),
    );
    surveys.insert("pulse".to_string(), columns);
    SurveyMappingConfig::new(surveys, BTreeMap::new())
}

fn pulse_survey(rows: usize) -> SurveyTable {
    let mut table = SurveyTable::new(
        "pulse",
        vec![
            "ResponseID".to_string(),
            "NPS_Score".to_string(),
            "Overall_Satisfaction".to_string(),
        ],
    );
    for index in 0..rows {
        table.push_row(vec![
            CellValue::Text(format!("R-{index}")),
            CellValue::Number(9.0),
            CellValue::Text("Very Satisfied".to_string()),
        ]);
    }
    table
}

fn demographics_survey(rows: usize) -> SurveyTable {
    let mut table = SurveyTable::new(
        "demographics",
        vec!["ResponseID".to_string(), "Gender".to_string()],
    );
    for index in 0..rows {
        table.push_row(vec![
            CellValue::Text(format!("D-{index}")),
            CellValue::Text("prefer not to say".to_string()),
        ]);
    }
    table
}

fn run_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn ltr_and_metadata_surveys_split_across_outputs() {
    // Scenario: one survey with an LTR column and ten rows, one with only
    // metadata columns and five rows.
    let source = MemorySource::new(vec![pulse_survey(10), demographics_survey(5)]);
    let surveys = vec!["pulse".to_string(), "demographics".to_string()];

    let output = run_pipeline(
        &surveys,
        &source,
        &store(),
        &mappings(),
        &taxonomy(),
        PipelineOptions::default(),
        run_at(),
    )
    .expect("run pipeline");

    let combined_all = output.combined_all.expect("combined dataset");
    let combined_ltr = output.combined_ltr_drivers.expect("ltr dataset");
    assert_eq!(combined_all.height(), 15);
    assert_eq!(combined_ltr.height(), 10);

    // Union schema in first-seen order, missing markers for absent cells.
    assert_eq!(
        combined_all.columns,
        vec![
            "ResponseID",
            "NPS_Score",
            "Overall_Satisfaction",
            "Survey_Name",
            "Processed_Date",
            "Gender"
        ]
    );
    let nps = combined_all.column_index("NPS_Score").unwrap();
    assert_eq!(combined_all.cell(10, nps), Some(&CellValue::Missing));

    // The metadata-only survey succeeded but is not LTR/driver eligible.
    assert_eq!(output.summaries.len(), 2);
    assert_eq!(output.summaries[0].status, RunStatus::Success);
    assert!(output.summaries[0].has_ltr);
    assert_eq!(output.summaries[1].status, RunStatus::Success);
    assert!(!output.summaries[1].has_ltr);
    assert!(!output.summaries[1].has_drivers);
}

#[test]
fn transformed_values_reach_the_combined_output() {
    let source = MemorySource::new(vec![pulse_survey(3)]);
    let surveys = vec!["pulse".to_string()];

    let output = run_pipeline(
        &surveys,
        &source,
        &store(),
        &mappings(),
        &taxonomy(),
        PipelineOptions::default(),
        run_at(),
    )
    .expect("run pipeline");

    let combined = output.combined_all.expect("combined dataset");
    let satisfaction = combined.column_index("Overall_Satisfaction").unwrap();
    assert_eq!(combined.cell(0, satisfaction), Some(&CellValue::Number(5.0)));

    // Bookkeeping columns carry origin and processing date.
    let survey = combined.column_index("Survey_Name").unwrap();
    let date = combined.column_index("Processed_Date").unwrap();
    assert_eq!(combined.cell(0, survey), Some(&CellValue::Text("pulse".to_string())));
    assert_eq!(
        combined.cell(0, date),
        Some(&CellValue::Text("2024-06-01".to_string()))
    );

    assert_eq!(output.summaries[0].columns_transformed, 1);
}

#[test]
fn unrecognized_column_excludes_the_survey_from_both_outputs() {
    let mut weird = SurveyTable::new(
        "weird",
        vec![
            "ResponseID".to_string(),
            "Timestamp".to_string(),
            "Weird_Column".to_string(),
        ],
    );
    weird.push_row(vec![
        CellValue::Text("W-1".to_string()),
        CellValue::Text("2024-01-01".to_string()),
        CellValue::Text("??".to_string()),
    ]);

    let source = MemorySource::new(vec![pulse_survey(4), weird]);
    let surveys = vec!["pulse".to_string(), "weird".to_string()];

    let output = run_pipeline(
        &surveys,
        &source,
        &store(),
        &mappings(),
        &taxonomy(),
        PipelineOptions::default(),
        run_at(),
    )
    .expect("run pipeline");

    // Only the valid survey contributes rows.
    assert_eq!(output.combined_all.expect("combined dataset").height(), 4);
    assert_eq!(output.combined_ltr_drivers.expect("ltr dataset").height(), 4);

    let failed = &output.summaries[1];
    assert_eq!(
        failed.status,
        RunStatus::Error("column validation failed".to_string())
    );
    // Counts and category presence are still recorded for the skipped
    // survey.
    assert_eq!(failed.records_processed, 1);
    assert!(failed.column_count > 0);
}

#[test]
fn source_failures_are_isolated_per_survey() {
    let source = MemorySource::new(vec![pulse_survey(2), demographics_survey(3)]);
    let surveys = vec![
        "pulse".to_string(),
        "unreachable".to_string(),
        "demographics".to_string(),
    ];

    let output = run_pipeline(
        &surveys,
        &source,
        &store(),
        &mappings(),
        &taxonomy(),
        PipelineOptions::default(),
        run_at(),
    )
    .expect("run pipeline");

    let statuses: Vec<&RunStatus> = output.summaries.iter().map(|s| &s.status).collect();
    assert_eq!(
        statuses,
        vec![
            &RunStatus::Success,
            &RunStatus::FailedToLoad,
            &RunStatus::Success
        ]
    );
    // Row count equals the sum over surveys that passed validation.
    assert_eq!(output.combined_all.expect("combined dataset").height(), 5);
}

#[test]
fn empty_survey_is_recorded_as_no_data() {
    let empty = SurveyTable::new("hollow", vec!["ResponseID".to_string()]);
    let source = MemorySource::new(vec![empty]);
    let surveys = vec!["hollow".to_string()];

    let output = run_pipeline(
        &surveys,
        &source,
        &store(),
        &mappings(),
        &taxonomy(),
        PipelineOptions::default(),
        run_at(),
    )
    .expect("run pipeline");

    assert_eq!(output.summaries[0].status, RunStatus::NoData);
    assert!(output.combined_all.is_none());
    assert!(output.combined_ltr_drivers.is_none());
}

#[test]
fn every_survey_failing_still_yields_a_summary() {
    let source = MemorySource::new(vec![]);
    let surveys = vec!["a".to_string(), "b".to_string()];

    let output = run_pipeline(
        &surveys,
        &source,
        &store(),
        &mappings(),
        &taxonomy(),
        PipelineOptions::default(),
        run_at(),
    )
    .expect("run pipeline");

    assert!(output.combined_all.is_none());
    assert!(output.combined_ltr_drivers.is_none());
    assert_eq!(output.summaries.len(), 2);
    assert!(
        output
            .summaries
            .iter()
            .all(|s| s.status == RunStatus::FailedToLoad)
    );
}

#[test]
fn config_errors_halt_the_run_before_any_survey() {
    let mut surveys_config = BTreeMap::new();
    let mut columns = BTreeMap::new();
    columns.insert("Mood".to_string(), "mood_9_scale".to_string());
    surveys_config.insert("pulse".to_string(), columns);
    let broken = SurveyMappingConfig::new(surveys_config, BTreeMap::new());

    let source = MemorySource::new(vec![pulse_survey(2)]);
    let surveys = vec!["pulse".to_string()];

    let error = run_pipeline(
        &surveys,
        &source,
        &store(),
        &broken,
        &taxonomy(),
        PipelineOptions::default(),
        run_at(),
    )
    .expect_err("broken configuration");
    assert!(matches!(error, ConfigError::UnknownDictionary { .. }));
}

#[test]
fn configured_run_persists_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    // Standards documents.
    let standards_dir = root.join("standards");
    std::fs::create_dir_all(&standards_dir).expect("create standards dir");
    std::fs::write(
        standards_dir.join("mapping_dictionaries.json"),
        r#"{"dictionaries": {"satisfaction_5_scale": {
            "Very Dissatisfied": 1, "Dissatisfied": 2, "Neutral": 3,
            "Satisfied": 4, "Very Satisfied": 5}}}"#,
    )
    .expect("write dictionaries");
    std::fs::write(
        standards_dir.join("survey_column_mappings.json"),
        r#"{"surveys": {"pulse": {"columns":
            {"Overall_Satisfaction": "satisfaction_5_scale"}}},
            "default_mappings": {}}"#,
    )
    .expect("write survey mappings");
    std::fs::write(
        standards_dir.join("column_taxonomy.json"),
        r#"{"ResponseID": "STANDARD", "Timestamp": "STANDARD",
            "Overall_Satisfaction": "DRIVERS"}"#,
    )
    .expect("write taxonomy");

    // Survey data.
    let data_dir = root.join("data");
    std::fs::create_dir_all(&data_dir).expect("create data dir");
    std::fs::write(
        data_dir.join("pulse.csv"),
        "ResponseID,Timestamp,Overall_Satisfaction\n\
         R-1,2024-01-01,Very Satisfied\n\
         R-2,2024-01-02,Dissatisfied\n",
    )
    .expect("write survey csv");

    let config_text = format!(
        r#"
[run]
surveys = ["pulse", "missing_survey"]

[paths]
standards_dir = "{standards}"
source_dir = "{data}"
archive_dir = "{archive}"
current_dir = "{current}"
"#,
        standards = standards_dir.display(),
        data = data_dir.display(),
        archive = root.join("archive").display(),
        current = root.join("current").display(),
    );
    let config =
        RunConfig::from_str(&config_text, std::path::Path::new("svy.toml")).expect("parse config");

    let report = run_from_config(&config).expect("run from config");

    assert_eq!(report.output.summaries.len(), 2);
    assert_eq!(report.output.summaries[0].status, RunStatus::Success);
    assert_eq!(report.output.summaries[1].status, RunStatus::FailedToLoad);

    // Three current artifacts plus three archive copies.
    assert_eq!(report.artifacts.current.len(), 3);
    assert_eq!(report.artifacts.archive.len(), 3);

    let current = std::fs::read_to_string(root.join("current/combined_all_surveys.csv"))
        .expect("read combined output");
    let mut lines = current.lines();
    assert_eq!(
        lines.next(),
        Some("ResponseID,Timestamp,Overall_Satisfaction,Survey_Name,Processed_Date")
    );
    let first = lines.next().expect("first data row");
    assert!(first.starts_with("R-1,2024-01-01,5,pulse,"));

    let summary = std::fs::read_to_string(root.join("current/processing_summary.csv"))
        .expect("read summary output");
    assert!(summary.contains("pulse"));
    assert!(summary.contains("FailedToLoad"));
}
