//! Core health scoring engine for FloorGuard
//!
//! Turns raw machine sensor readings into health scores and alerts.
//! Everything here is a pure function of the registry contents: the only
//! mutation is appending readings to machines.
//!
//! Key rules:
//! - A machine missing a required sensor type scores 0
//! - Deductions come from a per-type rule table
//! - Scores are clamped to 0..=100
//!
//! ```
//! use floorguard_core::{FactoryRegistry, MachineScorer, SensorReading, SensorType};
//!
//! let mut registry = FactoryRegistry::new();
//! registry.add_reading("M1", SensorReading::new("T1", SensorType::Temperature, 110.0)?);
//! registry.add_reading("M1", SensorReading::new("P1", SensorType::Pressure, 50.0)?);
//! registry.add_reading("M1", SensorReading::new("V1", SensorType::Vibration, 70.0)?);
//!
//! let scorer = MachineScorer::default();
//! let result = scorer.score(registry.get("M1").unwrap());
//! assert_eq!(result.score, 80);
//! assert_eq!(result.alerts, vec!["Temperature slightly above safe limit"]);
//! # Ok::<(), floorguard_core::ReadingError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod health;
pub mod machine;
pub mod registry;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod sensor;
pub mod stats;
pub mod validate;

// Public API
pub use errors::{ReadingError, ReadingResult};
pub use health::sensor_health;
pub use machine::Machine;
pub use registry::FactoryRegistry;
pub use report::{FactoryAggregator, FactoryReport, MachineReport};
pub use rules::{RuleTable, SensorRule, Severity, Violation};
pub use scoring::{MachineScorer, ScoreResult};
pub use sensor::{SensorReading, SensorType, REQUIRED_SENSOR_TYPES};
pub use stats::SummaryStats;
pub use validate::{parse_reading, RawValue, Validatable};

/// Crate version, as published
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
