//! Per-sensor health model
//!
//! A normalized 0..=100 health value for a single reading. This is a
//! statistic only: it runs on its own curves and is never reconciled with
//! the machine score, which comes from rule table deductions.
//!
//! | Type        | Healthy range | Falloff                      |
//! |-------------|---------------|------------------------------|
//! | Temperature | <= 100        | 1 point per degree over      |
//! | Pressure    | >= 40         | scales as `reading * 2.5`    |
//! | Vibration   | <= 70         | 2 points per unit over       |
//! | Unknown     | always 100    |                              |

use crate::sensor::{SensorReading, SensorType};

/// Upper bound of the health scale
pub const MAX_SENSOR_HEALTH: f64 = 100.0;

/// Normalized health of one reading, in `0.0..=100.0`
pub fn sensor_health(reading: &SensorReading) -> f64 {
    health_for(reading.sensor_type(), reading.value())
}

/// Normalized health of a raw value for a sensor type
pub fn health_for(sensor_type: &SensorType, value: f64) -> f64 {
    let health = match sensor_type {
        SensorType::Temperature if value <= 100.0 => MAX_SENSOR_HEALTH,
        SensorType::Temperature => MAX_SENSOR_HEALTH - (value - 100.0),
        SensorType::Pressure if value >= 40.0 => MAX_SENSOR_HEALTH,
        SensorType::Pressure => value * 2.5,
        SensorType::Vibration if value <= 70.0 => MAX_SENSOR_HEALTH,
        SensorType::Vibration => MAX_SENSOR_HEALTH - (value - 70.0) * 2.0,
        SensorType::Unknown(_) => MAX_SENSOR_HEALTH,
    };

    health.max(0.0)
}
