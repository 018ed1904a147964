//! Machine health scoring
//!
//! Scores a machine from its current readings. The result is a pure function
//! of the readings, so scoring twice without new readings is identical.
//!
//! ## Algorithm
//!
//! 1. **Short-circuit**: any required type without a reading scores the
//!    machine 0 with a single offline alert. No rules are evaluated.
//! 2. **Deductions**: starting from 100, each reading in arrival order is
//!    checked against its rule and loses at most one deduction.
//! 3. **Clamp** to `0..=100`.
//! 4. **Critical**: below 50, a final critical alert is appended.
//!
//! Alerts are deduplicated by text and kept in first-seen order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::machine::Machine;
use crate::rules::RuleTable;

/// Score of a machine with no deductions
pub const MAX_HEALTH_SCORE: i64 = 100;

/// Scores strictly below this raise the critical alert
pub const CRITICAL_THRESHOLD: u8 = 50;

/// Appended last when the score falls below [`CRITICAL_THRESHOLD`]
pub const CRITICAL_ALERT: &str = "Critical Machine Failure Risk";

/// Prefix of the short-circuit alert
pub const SENSOR_OFFLINE_PREFIX: &str = "Sensor Offline Warning: Missing ";

/// Prefix of the informational alert for types without a rule
pub const UNKNOWN_TYPE_PREFIX: &str = "Unknown sensor type detected: ";

/// Health score and alerts for one machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Health score, 0..=100
    pub score: u8,
    /// Alerts in first-detection order, no duplicates
    pub alerts: Vec<String>,
}

impl ScoreResult {
    /// Whether any alert is active
    pub fn is_alert(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// The first alert raised, if any
    pub fn primary_alert(&self) -> Option<&str> {
        self.alerts.first().map(String::as_str)
    }

    /// Whether the critical alert was raised
    pub fn is_critical(&self) -> bool {
        self.score < CRITICAL_THRESHOLD
    }
}

/// Insertion-ordered alert set
#[derive(Default)]
struct AlertSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl AlertSet {
    fn add(&mut self, alert: &str) {
        if !self.seen.contains(alert) {
            self.seen.insert(alert.to_string());
            self.ordered.push(alert.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Scores machines against a rule table
#[derive(Debug, Clone, Default)]
pub struct MachineScorer {
    rules: RuleTable,
}

impl MachineScorer {
    /// Scorer using a custom rule table
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Rule table in use
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Compute the health score and alerts for a machine
    pub fn score(&self, machine: &Machine) -> ScoreResult {
        let missing = machine.missing_types();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|ty| ty.name()).collect();
            log::debug!("machine {} short-circuited, missing {:?}", machine.id(), names);
            return ScoreResult {
                score: 0,
                alerts: vec![format!("{SENSOR_OFFLINE_PREFIX}{}", names.join(", "))],
            };
        }

        let mut score = MAX_HEALTH_SCORE;
        let mut alerts = AlertSet::default();

        for reading in machine.readings() {
            let Some(rule) = self.rules.rule(reading.sensor_type()) else {
                alerts.add(&format!("{UNKNOWN_TYPE_PREFIX}{}", reading.sensor_type()));
                continue;
            };

            if let Some(violation) = rule.evaluate(reading.value()) {
                score -= i64::from(violation.deduction);
                alerts.add(violation.alert);
            }
        }

        let score = score.clamp(0, MAX_HEALTH_SCORE) as u8;
        if score < CRITICAL_THRESHOLD {
            alerts.add(CRITICAL_ALERT);
        }

        ScoreResult {
            score,
            alerts: alerts.into_vec(),
        }
    }

    /// Score only, discarding alerts
    pub fn health(&self, machine: &Machine) -> u8 {
        self.score(machine).score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{SensorReading, SensorType};

    fn machine(readings: &[(&str, f64)]) -> Machine {
        let mut machine = Machine::new("M1");
        for (i, (label, value)) in readings.iter().enumerate() {
            let ty = SensorType::from_label(label);
            let id = format!("S{i}");
            machine.add_reading(SensorReading::new(id, ty, *value).unwrap());
        }
        machine
    }

    #[test]
    fn all_normal_has_no_alerts() {
        let m = machine(&[("Temperature", 80.0), ("Pressure", 90.0), ("Vibration", 20.0)]);
        let result = MachineScorer::default().score(&m);

        assert_eq!(result.score, 100);
        assert!(result.alerts.is_empty());
        assert!(!result.is_alert());
        assert_eq!(result.primary_alert(), None);
    }

    #[test]
    fn soft_temperature_only() {
        let m = machine(&[("Temperature", 110.0), ("Pressure", 50.0), ("Vibration", 70.0)]);
        let result = MachineScorer::default().score(&m);

        assert_eq!(result.score, 80);
        assert_eq!(result.alerts, vec!["Temperature slightly above safe limit"]);
        assert!(!result.is_critical());
    }

    #[test]
    fn everything_hard_clamps_to_zero() {
        let m = machine(&[("Temperature", 121.0), ("Pressure", 29.0), ("Vibration", 91.0)]);
        let result = MachineScorer::default().score(&m);

        assert_eq!(result.score, 0);
        assert_eq!(
            result.alerts,
            vec![
                "High Temperature Risk",
                "Low Pressure Risk",
                "Extreme Vibration Risk",
                "Critical Machine Failure Risk",
            ]
        );
        assert_eq!(result.primary_alert(), Some("High Temperature Risk"));
    }

    #[test]
    fn missing_types_short_circuit() {
        let m = machine(&[("Temperature", 500.0), ("Humidity", 10.0)]);
        let result = MachineScorer::default().score(&m);

        assert_eq!(result.score, 0);
        assert_eq!(
            result.alerts,
            vec!["Sensor Offline Warning: Missing Pressure, Vibration"]
        );
    }

    #[test]
    fn duplicate_alerts_counted_once_but_deducted_twice() {
        let m = machine(&[
            ("Temperature", 105.0),
            ("Temperature", 108.0),
            ("Pressure", 90.0),
            ("Vibration", 20.0),
        ]);
        let result = MachineScorer::default().score(&m);

        assert_eq!(result.score, 60);
        assert_eq!(result.alerts, vec!["Temperature slightly above safe limit"]);
    }

    #[test]
    fn distinct_magnitudes_are_kept() {
        let m = machine(&[
            ("Vibration", 75.0),
            ("Vibration", 95.0),
            ("Temperature", 20.0),
            ("Pressure", 90.0),
        ]);
        let result = MachineScorer::default().score(&m);

        assert_eq!(result.score, 25);
        assert_eq!(
            result.alerts,
            vec![
                "Vibration slightly high",
                "Extreme Vibration Risk",
                "Critical Machine Failure Risk",
            ]
        );
    }

    #[test]
    fn unknown_type_is_informational() {
        let m = machine(&[
            ("Temperature", 20.0),
            ("Acoustic", 120.0),
            ("Pressure", 90.0),
            ("Vibration", 20.0),
            ("Acoustic", 130.0),
        ]);
        let result = MachineScorer::default().score(&m);

        assert_eq!(result.score, 100);
        assert_eq!(result.alerts, vec!["Unknown sensor type detected: Acoustic"]);
        assert!(result.is_alert());
    }

    #[test]
    fn critical_alert_at_threshold_boundary() {
        // 100 - 50 = 50: not critical
        let m = machine(&[("Temperature", 20.0), ("Pressure", 90.0), ("Vibration", 95.0)]);
        let result = MachineScorer::default().score(&m);
        assert_eq!(result.score, 50);
        assert_eq!(result.alerts, vec!["Extreme Vibration Risk"]);

        // 100 - 50 - 20 = 30: critical
        let m = machine(&[("Temperature", 110.0), ("Pressure", 90.0), ("Vibration", 95.0)]);
        let result = MachineScorer::default().score(&m);
        assert_eq!(result.score, 30);
        assert_eq!(result.alerts.last().map(String::as_str), Some(CRITICAL_ALERT));
    }

    #[test]
    fn custom_table_without_rule_reports_unknown() {
        let scorer = MachineScorer::new(RuleTable::empty());
        let m = machine(&[("Temperature", 500.0), ("Pressure", 0.0), ("Vibration", 500.0)]);
        let result = scorer.score(&m);

        assert_eq!(result.score, 100);
        assert_eq!(result.alerts.len(), 3);
        assert_eq!(result.alerts[0], "Unknown sensor type detected: Temperature");
    }
}
