//! Error Types for Reading Validation
//!
//! ## Design Philosophy
//!
//! The core engine has exactly one failure mode: a raw value that cannot be
//! turned into a finite number. Everything downstream of a constructed
//! [`SensorReading`](crate::SensorReading) is infallible, because:
//!
//! 1. **Readings are validated once**: construction rejects NaN and infinity,
//!    so the scorer and aggregator never see them.
//!
//! 2. **Missing data is policy, not error**: a machine without full
//!    instrumentation is scored 0 with an offline alert instead of failing.
//!
//! 3. **Unknown sensor types are informational**: they produce an alert and
//!    are otherwise ignored.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use floorguard_core::{parse_reading, ReadingError, SensorType};
//!
//! match parse_reading(&SensorType::Pressure, "n/a") {
//!     Ok(value) => {
//!         // Append to the machine
//!         # let _ = value;
//!     }
//!     Err(ReadingError::InvalidReading { sensor_type, raw }) => {
//!         // Skip the row; never substitute zero
//!         # let _ = (sensor_type, raw);
//!     }
//! }
//! ```
//!
//! Ingestion-level failures (missing files, bad headers) live in the ingest
//! crate; they are batch concerns, not reading concerns.

use thiserror::Error;

/// Result type for reading validation
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Reading validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadingError {
    /// Raw value is not a finite number
    #[error("Invalid value for {sensor_type} sensor: {raw:?}")]
    InvalidReading {
        /// Sensor type label the value was meant for
        sensor_type: String,
        /// The offending raw token, as received
        raw: String,
    },
}

impl ReadingError {
    /// Build an `InvalidReading` from any displayable type and raw token
    pub fn invalid(sensor_type: impl ToString, raw: impl ToString) -> Self {
        Self::InvalidReading {
            sensor_type: sensor_type.to_string(),
            raw: raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_reading_names_type_and_value() {
        let err = ReadingError::invalid("Temperature", "abc");
        assert_eq!(err.to_string(), "Invalid value for Temperature sensor: \"abc\"");
    }
}
