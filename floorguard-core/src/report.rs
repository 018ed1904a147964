//! Factory-wide aggregation
//!
//! Reads the registry, never writes it. Every report is built fresh from the
//! current readings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::machine::Machine;
use crate::registry::FactoryRegistry;
use crate::scoring::{MachineScorer, ScoreResult};
use crate::sensor::{SensorType, REQUIRED_SENSOR_TYPES};
use crate::stats::SummaryStats;

/// Report entry for one machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineReport {
    /// Machine identifier
    pub machine_id: String,
    /// Score and alerts
    pub result: ScoreResult,
    /// Number of readings held
    pub sensor_count: usize,
    /// Raw reading values
    pub reading_stats: SummaryStats,
    /// Normalized per-sensor health
    pub sensor_health: SummaryStats,
}

/// Snapshot of the whole factory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryReport {
    /// Per-machine entries in registry order
    pub machines: Vec<MachineReport>,
    /// Mean machine score, 0 for an empty factory
    pub average_health: f64,
    /// Spread of machine scores
    pub health: SummaryStats,
    /// Reading values per sensor type, factory-wide
    pub sensor_stats: BTreeMap<SensorType, SummaryStats>,
}

impl FactoryReport {
    /// Look up one machine's entry
    pub fn machine(&self, machine_id: &str) -> Option<&MachineReport> {
        self.machines.iter().find(|m| m.machine_id == machine_id)
    }

    /// Machines with at least one active alert
    pub fn alerting(&self) -> impl Iterator<Item = &MachineReport> {
        self.machines.iter().filter(|m| m.result.is_alert())
    }
}

/// Builds factory statistics and reports
#[derive(Debug, Clone, Default)]
pub struct FactoryAggregator {
    scorer: MachineScorer,
}

impl FactoryAggregator {
    /// Aggregator using a custom scorer
    pub fn new(scorer: MachineScorer) -> Self {
        Self { scorer }
    }

    /// Scorer in use
    pub fn scorer(&self) -> &MachineScorer {
        &self.scorer
    }

    /// Mean of every machine's score
    pub fn average_health(&self, registry: &FactoryRegistry) -> f64 {
        self.health_stats(registry).avg
    }

    /// Average, lowest and highest machine score
    pub fn health_stats(&self, registry: &FactoryRegistry) -> SummaryStats {
        registry
            .iter()
            .map(|machine| f64::from(self.scorer.health(machine)))
            .collect()
    }

    /// Reading values of one type across every machine
    pub fn sensor_stats(&self, registry: &FactoryRegistry, sensor_type: &SensorType) -> SummaryStats {
        registry
            .iter()
            .flat_map(|machine| machine.values_of(sensor_type))
            .collect()
    }

    /// Build the report entry for one machine
    pub fn machine_report(&self, machine: &Machine) -> MachineReport {
        MachineReport {
            machine_id: machine.id().to_string(),
            result: self.scorer.score(machine),
            sensor_count: machine.sensor_count(),
            reading_stats: machine.reading_stats(),
            sensor_health: machine.sensor_health_stats(),
        }
    }

    /// Build a full report
    pub fn report(&self, registry: &FactoryRegistry) -> FactoryReport {
        let machines: Vec<MachineReport> =
            registry.iter().map(|m| self.machine_report(m)).collect();

        let health: SummaryStats = machines
            .iter()
            .map(|m| f64::from(m.result.score))
            .collect();

        let sensor_stats = REQUIRED_SENSOR_TYPES
            .iter()
            .map(|ty| (ty.clone(), self.sensor_stats(registry, ty)))
            .collect();

        log::debug!(
            "report built for {} machines, average health {:.2}",
            machines.len(),
            health.avg
        );

        FactoryReport {
            machines,
            average_health: health.avg,
            health,
            sensor_stats,
        }
    }
}
