//! Synchronous ingestion against files on disk, through to scoring

mod common;

use floorguard_core::{FactoryAggregator, FactoryRegistry, SensorType};
use floorguard_ingest::{
    IngestConfig, IngestError, RowErrorKind, SchemaSelection, SyncIngestor,
};

fn ingest(contents: &str) -> (Result<floorguard_ingest::IngestReport, IngestError>, FactoryRegistry) {
    let file = common::csv_file(contents);
    let mut registry = FactoryRegistry::new();
    let result = SyncIngestor::default().run_path(file.path(), &mut registry);
    (result, registry)
}

#[test]
fn empty_file_is_fatal() {
    let (result, registry) = ingest("");
    assert_eq!(result.unwrap_err(), IngestError::EmptySource);
    assert!(registry.is_empty());
}

#[test]
fn header_only_file_is_fatal() {
    let (result, registry) = ingest(&format!("{}\n", common::LONG_HEADER));
    assert_eq!(result.unwrap_err(), IngestError::NoDataRows);
    assert!(registry.is_empty());
}

#[test]
fn missing_file_names_the_path() {
    let mut registry = FactoryRegistry::new();
    let err = SyncIngestor::default()
        .run_path("does-not-exist.csv", &mut registry)
        .unwrap_err();

    assert_eq!(err.to_string(), "CSV file not found: does-not-exist.csv");
}

#[test]
fn bad_row_is_skipped_good_row_kept() {
    let (result, registry) = ingest(&format!(
        "{}\nM1,T1,Temperature,abc\nM1,T2,Temperature,85\n",
        common::LONG_HEADER
    ));
    let report = result.unwrap();

    assert_eq!(report.rows_read, 2);
    assert_eq!(report.rows_applied, 1);
    assert_eq!(report.row_errors.len(), 1);
    assert_eq!(report.row_errors[0].line, 2);
    assert!(matches!(report.row_errors[0].kind, RowErrorKind::InvalidReading(_)));

    let machine = registry.get("M1").unwrap();
    assert_eq!(machine.sensor_count(), 1);
    assert_eq!(machine.readings()[0].value(), 85.0);
}

#[test]
fn every_row_invalid_is_fatal() {
    let (result, registry) = ingest(&format!(
        "{}\nM1,T1,Temperature,\nM2,P1,Pressure,NaN\n",
        common::LONG_HEADER
    ));

    assert_eq!(result.unwrap_err(), IngestError::NoValidRows);
    assert!(registry.is_empty());
}

#[test]
fn readings_keep_source_order() {
    let (result, registry) = ingest(&common::long_rows(30, 4));
    let report = result.unwrap();

    assert_eq!(report.readings_applied, 30);
    assert_eq!(report.machines, vec!["M0", "M1", "M2", "M3"]);

    let m1: Vec<_> = registry
        .get("M1")
        .unwrap()
        .readings()
        .iter()
        .map(|reading| reading.sensor_id().to_string())
        .collect();
    assert_eq!(m1, vec!["T1", "T5", "T9", "T13", "T17", "T21", "T25", "T29"]);
}

#[test]
fn wide_rows_become_indexed_machines() {
    let (result, registry) = ingest(&format!(
        "{}\n80,90,20\n110,50,70\n85,x,20\n",
        common::WIDE_HEADER
    ));
    let report = result.unwrap();

    assert_eq!(report.machines, vec!["0", "1"]);
    assert_eq!(report.row_errors[0].line, 4);
    assert!(!registry.contains("2"));

    let floor = FactoryAggregator::default().report(&registry);
    assert_eq!(floor.machine("0").unwrap().result.score, 100);
    assert_eq!(floor.machine("1").unwrap().result.score, 80);
    assert_eq!(floor.average_health, 90.0);
}

#[test]
fn forced_schema_reports_missing_columns() {
    let file = common::csv_file(&format!("{}\n80,90,20\n", common::WIDE_HEADER));
    let mut registry = FactoryRegistry::new();
    let ingestor = SyncIngestor::new(IngestConfig::new().schema(SchemaSelection::Long));

    let err = ingestor.run_path(file.path(), &mut registry).unwrap_err();
    assert_eq!(
        err,
        IngestError::MissingColumns {
            missing: vec![
                "machineId".into(),
                "sensorId".into(),
                "type".into(),
                "reading".into()
            ]
        }
    );
}

#[test]
fn scored_floor_end_to_end() {
    let (result, registry) = ingest(&common::instrumented_floor(&[
        ("press-1", 80.0, 90.0, 20.0),
        ("press-2", 130.0, 20.0, 95.0),
    ]));
    result.unwrap();

    let floor = FactoryAggregator::default().report(&registry);
    let failing = floor.machine("press-2").unwrap();

    assert_eq!(failing.result.score, 0);
    assert_eq!(
        failing.result.alerts,
        vec![
            "High Temperature Risk",
            "Low Pressure Risk",
            "Extreme Vibration Risk",
            "Critical Machine Failure Risk",
        ]
    );
    assert_eq!(floor.sensor_stats[&SensorType::Pressure].min, 20.0);
    assert_eq!(floor.alerting().count(), 1);
}
