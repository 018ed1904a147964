//! Sensor types and readings
//!
//! The set of sensor types is closed: temperature, pressure and vibration
//! are the three a machine needs to be scored. Anything else is kept as
//! [`SensorType::Unknown`] with its raw label so it can be reported.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ReadingError, ReadingResult};
use crate::validate::Validatable;

/// Sensor types every machine must report before it can be scored
pub const REQUIRED_SENSOR_TYPES: [SensorType; 3] = [
    SensorType::Temperature,
    SensorType::Pressure,
    SensorType::Vibration,
];

/// Sensor type enumeration
///
/// Maps to a rule table entry and a health model curve
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SensorType {
    /// Temperature sensor
    Temperature,
    /// Pressure sensor
    Pressure,
    /// Vibration sensor
    Vibration,
    /// Label not recognised, kept verbatim
    Unknown(String),
}

impl SensorType {
    /// Parse a label, case-insensitively. Never fails; unrecognised labels
    /// become `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("temperature") {
            SensorType::Temperature
        } else if label.eq_ignore_ascii_case("pressure") {
            SensorType::Pressure
        } else if label.eq_ignore_ascii_case("vibration") {
            SensorType::Vibration
        } else {
            SensorType::Unknown(label.to_string())
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &str {
        match self {
            SensorType::Temperature => "Temperature",
            SensorType::Pressure => "Pressure",
            SensorType::Vibration => "Vibration",
            SensorType::Unknown(label) => label,
        }
    }

    /// Whether this is one of the required types
    pub fn is_required(&self) -> bool {
        !matches!(self, SensorType::Unknown(_))
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for SensorType {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<&str> for SensorType {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<SensorType> for String {
    fn from(sensor_type: SensorType) -> Self {
        match sensor_type {
            SensorType::Unknown(label) => label,
            known => known.name().to_string(),
        }
    }
}

/// Single sensor reading
///
/// Immutable once built. The value is always finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    sensor_id: String,
    sensor_type: SensorType,
    value: f64,
}

impl SensorReading {
    /// Create a reading, rejecting NaN and infinite values
    pub fn new(
        sensor_id: impl Into<String>,
        sensor_type: SensorType,
        value: f64,
    ) -> ReadingResult<Self> {
        if !value.is_valid() {
            return Err(ReadingError::invalid(&sensor_type, value));
        }

        Ok(Self {
            sensor_id: sensor_id.into(),
            sensor_type,
            value,
        })
    }

    /// Sensor identifier within its machine
    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    /// Sensor type
    pub fn sensor_type(&self) -> &SensorType {
        &self.sensor_type
    }

    /// Reading value
    pub fn value(&self) -> f64 {
        self.value
    }
}
