//! Integration tests for the profiling engine.
//!
//! These tests verify end-to-end behavior from CSV fixtures to profiles,
//! relations and reports.

use eda_profiler::{
    Cell, ColumnType, DataProfiler, Dataset, ProfilerConfig, ProfilingError, ProfilingSession,
    RelationResult, ReportGenerator, load_csv, read_csv_str,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture_frame(filename: &str) -> DataFrame {
    let path = fixtures_path().join(filename);
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file")
}

fn people_session() -> ProfilingSession {
    let dataset = load_csv(fixtures_path().join("people.csv")).expect("Failed to load people.csv");
    ProfilingSession::new(dataset, ProfilerConfig::default()).unwrap()
}

// ============================================================================
// Ingestion Tests
// ============================================================================

#[test]
fn test_dataframe_and_loader_agree() {
    let df = load_fixture_frame("people.csv");
    let from_frame = Dataset::from_dataframe(&df).unwrap();
    let loaded = load_csv(fixtures_path().join("people.csv")).unwrap();

    assert_eq!(from_frame, loaded);
    assert_eq!(loaded.row_count(), 6);
    assert_eq!(
        loaded.schema(),
        &["name", "age", "city", "income", "member"]
    );
}

#[test]
fn test_semicolon_file_with_blank_line() {
    let dataset = load_csv(fixtures_path().join("sales_semicolon.csv")).unwrap();
    assert_eq!(dataset.schema(), &["region", "units", "price"]);
    assert_eq!(dataset.row_count(), 4);
    assert!(dataset.rows()[1][1].is_missing());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_csv(fixtures_path().join("does_not_exist.csv")).unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
}

// ============================================================================
// Type Inference and Overview Tests
// ============================================================================

#[test]
fn test_people_types() {
    let session = people_session();
    let types = session.type_map();

    assert_eq!(types.get("name"), Some(ColumnType::Categorical));
    assert_eq!(types.get("age"), Some(ColumnType::Numeric));
    assert_eq!(types.get("city"), Some(ColumnType::Categorical));
    assert_eq!(types.get("income"), Some(ColumnType::Numeric));
    // Booleans never count as numbers
    assert_eq!(types.get("member"), Some(ColumnType::Categorical));
}

#[test]
fn test_people_overview() {
    let overview = people_session().overview();

    assert_eq!(overview.row_count, 6);
    assert_eq!(overview.column_count, 5);
    assert_eq!(overview.total_cells, 30);
    assert_eq!(overview.total_missing, 1);
    assert_eq!(overview.missing_for("age"), Some(1));
    assert_eq!(overview.duplicate_rows, 1);
    assert_eq!(overview.type_distribution.numeric, 2);
    assert_eq!(overview.type_distribution.categorical, 3);
}

#[test]
fn test_all_missing_column_is_unknown() {
    let dataset = load_csv(fixtures_path().join("empty_column.csv")).unwrap();
    let session = ProfilingSession::new(dataset, ProfilerConfig::default()).unwrap();

    assert_eq!(session.column_type("notes").unwrap(), ColumnType::Unknown);
    assert_eq!(session.overview().type_distribution.unknown, 1);

    let desc = session.describe("notes").unwrap();
    assert_eq!(desc.as_categorical().unwrap().count, 0);
}

#[test]
fn test_high_cardinality_is_text() {
    let rows: Vec<Vec<Cell>> = (0..30).map(|i| vec![Cell::from(format!("user{i}"))]).collect();
    let dataset = Dataset::new(vec!["user".to_string()], rows).unwrap();
    let session = ProfilingSession::new(dataset, ProfilerConfig::default()).unwrap();
    assert_eq!(session.column_type("user").unwrap(), ColumnType::Text);
}

#[test]
fn test_formatted_numbers_need_stripping() {
    let csv = "item,amount\na,\"$1,200\"\nb,\"$950\"\nc,\"$3,000\"\nd,\"$20\"\n";
    let plain = ProfilingSession::new(read_csv_str(csv).unwrap(), ProfilerConfig::default())
        .unwrap();
    assert_eq!(
        plain.column_type("amount").unwrap(),
        ColumnType::Categorical
    );

    let config = ProfilerConfig::builder()
        .strip_numeric_formatting(true)
        .build()
        .unwrap();
    let lenient = ProfilingSession::new(read_csv_str(csv).unwrap(), config).unwrap();
    assert_eq!(lenient.column_type("amount").unwrap(), ColumnType::Numeric);

    let stats = *lenient.describe("amount").unwrap().as_numeric().unwrap();
    assert_eq!(stats.max, 3000.0);
    assert_eq!(stats.count, 4);
}

// ============================================================================
// Column Statistics Tests
// ============================================================================

#[test]
fn test_describe_age() {
    let session = people_session();
    let stats = *session.describe("age").unwrap().as_numeric().unwrap();

    assert_eq!(stats.count, 5);
    assert_eq!(stats.mean, 31.0);
    assert_eq!(stats.median, 30.0);
    assert_eq!(stats.min, 25.0);
    assert_eq!(stats.max, 40.0);
}

#[test]
fn test_describe_city() {
    let session = people_session();
    let desc = session.describe("city").unwrap();
    let summary = desc.as_categorical().unwrap();

    assert_eq!(summary.unique_count, 3);
    let top = summary.top_value.as_ref().unwrap();
    assert_eq!(top.value, "NY");
    assert_eq!(top.count, 4);
}

#[test]
fn test_column_profile_histogram_counts_values() {
    let session = people_session();
    let profile = session.profile_column("income").unwrap();
    let hist = profile.histogram.unwrap();

    assert_eq!(hist.total(), 6);
    assert_eq!(hist.labels().len(), hist.bin_count());
    assert_eq!(profile.box_plot.unwrap().max, 81000.0);
}

// ============================================================================
// Relation Tests
// ============================================================================

#[test]
fn test_age_income_correlation() {
    let session = people_session();
    let RelationResult::Correlation {
        coefficient,
        pair_count,
    } = session.relation("age", "income").unwrap()
    else {
        panic!("expected correlation");
    };

    assert_eq!(pair_count, 5);
    assert!(coefficient > 0.9 && coefficient <= 1.0);

    let reversed = session.relation("income", "age").unwrap();
    assert_eq!(
        reversed,
        RelationResult::Correlation {
            coefficient,
            pair_count
        }
    );
}

#[test]
fn test_income_by_city() {
    let session = people_session();
    let RelationResult::GroupedMeans { groups, .. } = session.relation("city", "income").unwrap()
    else {
        panic!("expected grouped means");
    };

    let names: Vec<&str> = groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(names, vec!["NY", "LA", "SF"]);
    assert_eq!(groups[0].count, 4);
    assert_eq!(groups[0].mean, (50000.0 + 58000.0 + 50000.0 + 81000.0) / 4.0);
}

#[test]
fn test_city_by_membership() {
    let session = people_session();
    let RelationResult::CrossTab(tab) = session.relation("city", "member").unwrap() else {
        panic!("expected crosstab");
    };

    assert_eq!(tab.column_categories, vec!["true", "false"]);
    assert_eq!(tab.get("NY", "true"), 3);
    assert_eq!(tab.get("NY", "false"), 1);
    assert_eq!(tab.get("SF", "false"), 0);
}

#[test]
fn test_relation_unknown_column() {
    let err = people_session().relation("age", "zip").unwrap_err();
    assert!(matches!(err, ProfilingError::ColumnNotFound(c) if c == "zip"));
}

// ============================================================================
// Session and Report Tests
// ============================================================================

#[test]
fn test_reload_replaces_everything() {
    let mut session = people_session();
    let sales = load_csv(fixtures_path().join("sales_semicolon.csv")).unwrap();
    session.reload(sales);

    assert_eq!(session.overview().row_count, 4);
    assert_eq!(session.column_type("price").unwrap(), ColumnType::Numeric);
    assert!(session.describe("age").is_err());
}

#[test]
fn test_full_profile_and_report() {
    let dataset = load_csv(fixtures_path().join("people.csv")).unwrap();
    let config = ProfilerConfig::builder().sample_rows(3).build().unwrap();
    let profile = DataProfiler::profile_dataset(&dataset, &config).unwrap();

    assert_eq!(profile.column_profiles.len(), 5);
    assert_eq!(profile.head.len(), 3);
    assert_eq!(profile.tail[2][0], Cell::from("Eva"));

    let report = ReportGenerator::build_report("people.csv", profile);
    assert_eq!(report.highlights.duplicate_rows, 1);
    assert!(report.highlights.high_missing_columns.is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["profile"]["overview"]["total_missing"], 1);
    assert_eq!(json["profile"]["type_map"]["entries"][1][1], "numeric");
}
