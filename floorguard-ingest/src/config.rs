//! Ingestion configuration
//!
//! ```rust
//! use floorguard_ingest::config::{IngestConfig, SchemaSelection};
//!
//! let config = IngestConfig::new()
//!     .schema(SchemaSelection::Long)
//!     .batch_size(50);
//!
//! assert_eq!(config.batch_size, 50);
//! ```

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Rows applied between yields in the cooperative strategy
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Optional machine id column of the wide schema
pub const MACHINE_ID_COLUMN: &str = "machineId";

/// Row layout of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `temperature,pressure,vibration`: one row per machine
    Wide,
    /// `machineId,sensorId,type,reading`: one row per reading
    Long,
}

impl Schema {
    /// Columns the header must contain
    pub const fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Schema::Wide => &["temperature", "pressure", "vibration"],
            Schema::Long => &["machineId", "sensorId", "type", "reading"],
        }
    }

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Schema::Wide => "wide",
            Schema::Long => "long",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the schema of a source is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaSelection {
    /// Long if the header has every long column, otherwise wide
    #[default]
    Auto,
    /// Always wide
    Wide,
    /// Always long
    Long,
}

/// Unrecognised configuration value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {what} `{value}`")]
pub struct ParseConfigError {
    /// Which setting was being parsed
    pub what: &'static str,
    /// Offending value
    pub value: String,
}

impl FromStr for SchemaSelection {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SchemaSelection::Auto),
            "wide" => Ok(SchemaSelection::Wide),
            "long" => Ok(SchemaSelection::Long),
            _ => Err(ParseConfigError {
                what: "schema",
                value: s.to_string(),
            }),
        }
    }
}

/// Ingestion settings shared by every strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Schema selection
    pub schema: SchemaSelection,
    /// Rows per batch for the cooperative strategy
    pub batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            schema: SchemaSelection::Auto,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl IngestConfig {
    /// Create configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set schema selection
    pub fn schema(mut self, schema: SchemaSelection) -> Self {
        self.schema = schema;
        self
    }

    /// Set batch size; zero is raised to one
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }
}
