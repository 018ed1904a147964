//! Shared fixtures for core integration tests
//!
//! Builds machines and registries from compact `(type, value)` tables so
//! tests read like the scenarios they describe.

#![allow(dead_code)]

use floorguard_core::{FactoryRegistry, Machine, SensorReading, SensorType};

/// Build a machine from `(type label, value)` pairs
///
/// Sensor ids are generated as `<type>-<index>`.
pub fn machine(id: &str, readings: &[(&str, f64)]) -> Machine {
    let mut machine = Machine::new(id);
    for (i, (label, value)) in readings.iter().enumerate() {
        let sensor_type = SensorType::from_label(label);
        let sensor_id = format!("{}-{}", sensor_type, i);
        machine.add_reading(SensorReading::new(sensor_id, sensor_type, *value).unwrap());
    }
    machine
}

/// Build a registry from per-machine reading tables
pub fn registry(machines: &[(&str, &[(&str, f64)])]) -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    for (id, readings) in machines {
        for (i, (label, value)) in readings.iter().enumerate() {
            let sensor_type = SensorType::from_label(label);
            let sensor_id = format!("{}-{}", sensor_type, i);
            registry.add_reading(id, SensorReading::new(sensor_id, sensor_type, *value).unwrap());
        }
    }
    registry
}

/// Fully instrumented machine with one reading per required type
pub fn instrumented(id: &str, temperature: f64, pressure: f64, vibration: f64) -> Machine {
    machine(
        id,
        &[
            ("Temperature", temperature),
            ("Pressure", pressure),
            ("Vibration", vibration),
        ],
    )
}
