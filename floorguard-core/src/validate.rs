//! Reading validation
//!
//! Normalizes raw tokens into finite numbers. A token that does not parse is
//! an error; it is never read as zero.

use crate::errors::{ReadingError, ReadingResult};
use crate::sensor::SensorType;

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

/// Raw reading token as it arrives from a row source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Textual field, e.g. a CSV cell
    Text(&'a str),
    /// Already-numeric field, e.g. from a decoded message
    Number(f64),
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(text: &'a str) -> Self {
        RawValue::Text(text)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(text: &'a String) -> Self {
        RawValue::Text(text.as_str())
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// Parse a raw token into a finite reading value for `sensor_type`
///
/// Text is trimmed first. Blank text, unparsable text and non-finite
/// results (`"NaN"`, `"inf"`) are all rejected.
pub fn parse_reading<'a>(
    sensor_type: &SensorType,
    raw: impl Into<RawValue<'a>>,
) -> ReadingResult<f64> {
    match raw.into() {
        RawValue::Number(value) if value.is_valid() => Ok(value),
        RawValue::Number(value) => Err(ReadingError::invalid(sensor_type, value)),
        RawValue::Text(text) => {
            let trimmed = text.trim();
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_valid() => Ok(value),
                _ => Err(ReadingError::invalid(sensor_type, text)),
            }
        }
    }
}
