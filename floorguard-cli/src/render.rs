//! Report rendering
//!
//! "All sensors normal" exists only here, as presentation of an empty
//! alert list.

use std::fmt::Write;

use floorguard_core::FactoryReport;
use floorguard_ingest::IngestReport;
use serde_json::json;

/// Shown for a machine with no alerts
pub const ALL_NORMAL: &str = "All sensors normal";

/// Shown in place of row counters the ingestion strategy does not collect
pub const NOT_REPORTED: &str = "not reported (logged by worker)";

/// Human-readable report
pub fn text(ingest: &IngestReport, report: &FactoryReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "=== CSV Load Report ===");
    if ingest.has_row_detail() {
        let _ = writeln!(out, "Rows read          : {}", ingest.rows_read);
        let _ = writeln!(out, "Rows skipped       : {}", ingest.rows_skipped());
    } else {
        let _ = writeln!(out, "Rows read          : {NOT_REPORTED}");
        let _ = writeln!(out, "Rows skipped       : {NOT_REPORTED}");
    }
    let _ = writeln!(out, "Readings applied   : {}", ingest.readings_applied);
    let _ = writeln!(out, "Machines loaded    : {}", ingest.machines.len());

    let _ = writeln!(out, "\n=== Factory Status Report ===\n");
    for machine in &report.machines {
        let _ = writeln!(out, "Machine {}:", machine.machine_id);
        let _ = writeln!(out, "  Total Sensors      : {}", machine.sensor_count);
        let _ = writeln!(out, "  Health Score       : {:.2}", f64::from(machine.result.score));
        let _ = writeln!(out, "  Avg Sensor Reading : {:.2}", machine.reading_stats.avg);
        let _ = writeln!(out, "  Max Reading        : {:.2}", machine.reading_stats.max);
        let _ = writeln!(out, "  Min Reading        : {:.2}", machine.reading_stats.min);
        let _ = writeln!(out, "  Sensor Health      : {:.2}", machine.sensor_health.avg);

        if machine.result.alerts.is_empty() {
            let _ = writeln!(out, "  {ALL_NORMAL}");
        }
        for alert in &machine.result.alerts {
            let _ = writeln!(out, "  Alert: {alert}");
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "Average Health: {:.2}", report.average_health);
    out
}

/// Machine-readable report
pub fn json(ingest: &IngestReport, report: &FactoryReport) -> serde_json::Result<String> {
    let value = json!({
        "ingest": {
            "rows_read": ingest.has_row_detail().then_some(ingest.rows_read),
            "rows_applied": ingest.has_row_detail().then_some(ingest.rows_applied),
            "rows_skipped": ingest.has_row_detail().then_some(ingest.rows_skipped()),
            "readings_applied": ingest.readings_applied,
            "machines": ingest.machines,
        },
        "report": report,
    });

    serde_json::to_string_pretty(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorguard_core::{FactoryAggregator, FactoryRegistry, SensorReading, SensorType};

    fn floor() -> (IngestReport, FactoryReport) {
        let mut registry = FactoryRegistry::new();
        for (machine, t, p, v) in [("M1", 80.0, 90.0, 20.0), ("M2", 110.0, 50.0, 70.0)] {
            registry.add_reading(machine, SensorReading::new("T1", SensorType::Temperature, t).unwrap());
            registry.add_reading(machine, SensorReading::new("P1", SensorType::Pressure, p).unwrap());
            registry.add_reading(machine, SensorReading::new("V1", SensorType::Vibration, v).unwrap());
        }

        let ingest = IngestReport {
            rows_read: 6,
            rows_applied: 6,
            readings_applied: 6,
            batches: 1,
            machines: vec!["M1".into(), "M2".into()],
            row_errors: Vec::new(),
        };
        (ingest, FactoryAggregator::default().report(&registry))
    }

    #[test]
    fn text_lists_machines_and_alerts() {
        let (ingest, report) = floor();
        let out = text(&ingest, &report);

        assert!(out.starts_with("=== CSV Load Report ===\nRows read          : 6\n"));
        assert!(out.contains("Machine M1:\n  Total Sensors      : 3\n  Health Score       : 100.00\n"));
        assert!(out.contains("  All sensors normal\n"));
        assert!(out.contains("  Alert: Temperature slightly above safe limit\n"));
        assert!(out.ends_with("Average Health: 90.00"));
    }

    #[test]
    fn offloaded_counts_are_marked_not_reported() {
        let (mut ingest, report) = floor();
        ingest.rows_read = 0;
        ingest.rows_applied = 0;

        let out = text(&ingest, &report);
        assert!(out.contains("Rows read          : not reported (logged by worker)\n"));
        assert!(out.contains("Readings applied   : 6\n"));

        let value: serde_json::Value = serde_json::from_str(&json(&ingest, &report).unwrap()).unwrap();
        assert!(value["ingest"]["rows_read"].is_null());
        assert_eq!(value["ingest"]["readings_applied"], 6);
    }

    #[test]
    fn json_carries_scores() {
        let (ingest, report) = floor();
        let value: serde_json::Value = serde_json::from_str(&json(&ingest, &report).unwrap()).unwrap();

        assert_eq!(value["ingest"]["rows_skipped"], 0);
        assert_eq!(value["report"]["machines"][1]["result"]["score"], 80);
        assert_eq!(value["report"]["average_health"], 90.0);
    }
}
