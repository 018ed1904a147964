//! Shared fixtures for ingestion integration tests
//!
//! Sources are written to temporary files so every strategy, including the
//! offloaded one, reads them from disk.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Long-schema header line
pub const LONG_HEADER: &str = "machineId,sensorId,type,reading";

/// Wide-schema header line
pub const WIDE_HEADER: &str = "temperature,pressure,vibration";

/// Write `contents` to a fresh temporary CSV file
pub fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Long-schema text with `rows` temperature readings spread over `machines`
/// machines; reading `i` has sensor id `T<i>` and value `60 + i % 40`
pub fn long_rows(rows: usize, machines: usize) -> String {
    let mut text = format!("{LONG_HEADER}\n");
    for i in 0..rows {
        text.push_str(&format!(
            "M{},T{},Temperature,{}\n",
            i % machines.max(1),
            i,
            60 + i % 40
        ));
    }
    text
}

/// Long-schema text with a full set of readings per machine
pub fn instrumented_floor(machines: &[(&str, f64, f64, f64)]) -> String {
    let mut text = format!("{LONG_HEADER}\n");
    for (id, temperature, pressure, vibration) in machines {
        text.push_str(&format!("{id},T1,Temperature,{temperature}\n"));
        text.push_str(&format!("{id},P1,Pressure,{pressure}\n"));
        text.push_str(&format!("{id},V1,Vibration,{vibration}\n"));
    }
    text
}
