//! Machine aggregate
//!
//! A machine is an append-only, insertion-ordered list of readings. A second
//! reading with an existing sensor id is a new entry, not an update.

use std::collections::HashSet;

use serde::Serialize;

use crate::health::sensor_health;
use crate::sensor::{SensorReading, SensorType, REQUIRED_SENSOR_TYPES};
use crate::stats::SummaryStats;

/// A machine and every reading received for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Machine {
    id: String,
    readings: Vec<SensorReading>,
    #[serde(skip)]
    types_present: HashSet<SensorType>,
}

impl Machine {
    /// Create a machine with no readings
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            readings: Vec::new(),
            types_present: HashSet::new(),
        }
    }

    /// Machine identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append a reading
    pub fn add_reading(&mut self, reading: SensorReading) {
        if !self.types_present.contains(reading.sensor_type()) {
            self.types_present.insert(reading.sensor_type().clone());
        }
        self.readings.push(reading);
    }

    /// Readings in arrival order
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    /// Consume the machine, yielding its readings in arrival order
    pub fn into_readings(self) -> Vec<SensorReading> {
        self.readings
    }

    /// Number of readings held
    pub fn sensor_count(&self) -> usize {
        self.readings.len()
    }

    /// Types observed at least once
    pub fn sensor_types_present(&self) -> &HashSet<SensorType> {
        &self.types_present
    }

    /// Whether at least one reading of `sensor_type` exists
    pub fn has_type(&self, sensor_type: &SensorType) -> bool {
        self.types_present.contains(sensor_type)
    }

    /// Required types with no reading, in required order
    pub fn missing_types(&self) -> Vec<SensorType> {
        REQUIRED_SENSOR_TYPES
            .iter()
            .filter(|ty| !self.has_type(ty))
            .cloned()
            .collect()
    }

    /// Values of every reading of one type, in arrival order
    pub fn values_of<'a>(&'a self, sensor_type: &'a SensorType) -> impl Iterator<Item = f64> + 'a {
        self.readings
            .iter()
            .filter(move |r| r.sensor_type() == sensor_type)
            .map(SensorReading::value)
    }

    /// Summary of raw values across all readings
    pub fn reading_stats(&self) -> SummaryStats {
        self.readings.iter().map(SensorReading::value).collect()
    }

    /// Summary of normalized per-sensor health across all readings
    pub fn sensor_health_stats(&self) -> SummaryStats {
        self.readings.iter().map(sensor_health).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(id: &str, ty: SensorType, value: f64) -> SensorReading {
        SensorReading::new(id, ty, value).unwrap()
    }

    #[test]
    fn readings_keep_arrival_order() {
        let mut machine = Machine::new("M1");
        machine.add_reading(reading("T1", SensorType::Temperature, 80.0));
        machine.add_reading(reading("T1", SensorType::Temperature, 81.0));
        machine.add_reading(reading("P1", SensorType::Pressure, 90.0));

        let values: Vec<f64> = machine.readings().iter().map(|r| r.value()).collect();
        assert_eq!(values, vec![80.0, 81.0, 90.0]);
        assert_eq!(machine.sensor_count(), 3);
    }

    #[test]
    fn missing_types_in_required_order() {
        let mut machine = Machine::new("M1");
        assert_eq!(machine.missing_types(), REQUIRED_SENSOR_TYPES.to_vec());

        machine.add_reading(reading("P1", SensorType::Pressure, 90.0));
        assert_eq!(
            machine.missing_types(),
            vec![SensorType::Temperature, SensorType::Vibration]
        );
    }

    #[test]
    fn stats_default_to_zero() {
        let machine = Machine::new("empty");
        assert_eq!(machine.reading_stats(), SummaryStats::default());
        assert_eq!(machine.sensor_health_stats(), SummaryStats::default());
    }

    #[test]
    fn health_stats_use_sensor_curves() {
        let mut machine = Machine::new("M1");
        machine.add_reading(reading("T1", SensorType::Temperature, 130.0));
        machine.add_reading(reading("V1", SensorType::Vibration, 50.0));

        let stats = machine.sensor_health_stats();
        assert_eq!(stats.min, 70.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.avg, 85.0);
    }
}
