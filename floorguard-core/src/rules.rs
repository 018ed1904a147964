//! Rule Table: Safe Operating Ranges and Score Deductions
//!
//! ## Overview
//!
//! Each sensor type maps to a [`SensorRule`] describing its safe operating
//! band, a softer warning band just inside the hard limits, and how many
//! points a breach costs the machine's health score.
//!
//! ```text
//!   hard-low   soft-low          safe           soft-high   hard-high
//! ─────────┤min├────────┤soft_min├─── ... ───┤soft_max├────────┤max├─────────
//!   -hard      -soft                             -soft         -hard
//! ```
//!
//! ## Boundaries
//!
//! All comparisons are strict. A reading exactly at `max` is not a hard
//! violation, and a reading exactly at `soft_max` is not a soft one. The same
//! holds on the low side.
//!
//! ## Standard Table
//!
//! | Type        | Hard  | Soft  | Deductions |
//! |-------------|-------|-------|------------|
//! | Temperature | > 120 | > 100 | 40 / 20    |
//! | Pressure    | < 30  | < 40  | 40 / 20    |
//! | Vibration   | > 90  | > 70  | 50 / 25    |
//!
//! ## Customization
//!
//! ```rust
//! use floorguard_core::{RuleTable, SensorRule, SensorType};
//!
//! // Oven line: derive soft bands from the default ratios
//! let oven = SensorRule::from_band(SensorType::Temperature, 50.0, 250.0);
//! let table = RuleTable::standard().with_rule(SensorType::Temperature, oven);
//!
//! let rule = table.rule(&SensorType::Temperature).unwrap();
//! assert_eq!(rule.soft_max, Some(225.0));
//! assert_eq!(rule.soft_min, Some(70.0));
//! ```

use std::collections::HashMap;

use crate::sensor::SensorType;

/// Fraction of `max` above which a reading is "slightly high"
pub const DEFAULT_SOFT_MAX_RATIO: f64 = 0.9;

/// Fraction of the band width above `min` below which a reading is "slightly low"
pub const DEFAULT_SOFT_MIN_RATIO: f64 = 0.1;

/// Default deduction for a hard limit breach
pub const DEFAULT_HARD_DEDUCTION: u32 = 40;

/// Default deduction for a soft band breach
pub const DEFAULT_SOFT_DEDUCTION: u32 = 20;

/// How serious a breach is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Outside the safe band
    Hard,
    /// Inside the warning band next to a hard limit
    Soft,
}

/// Which side of the band was breached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Reading too high
    High,
    /// Reading too low
    Low,
}

/// Outcome of evaluating one reading against its rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Violation<'a> {
    /// Hard or soft
    pub severity: Severity,
    /// High or low side
    pub direction: Direction,
    /// Points removed from the health score
    pub deduction: u32,
    /// Alert text to raise
    pub alert: &'a str,
}

/// Alert texts for each kind of breach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleAlerts {
    /// Above `max`
    pub high: String,
    /// Above `soft_max`
    pub slightly_high: String,
    /// Below `min`
    pub low: String,
    /// Below `soft_min`
    pub slightly_low: String,
}

impl RuleAlerts {
    /// Plain texts derived from the type name
    pub fn generic(sensor_type: &SensorType) -> Self {
        Self {
            high: format!("{sensor_type} too high"),
            slightly_high: format!("{sensor_type} slightly high"),
            low: format!("{sensor_type} too low"),
            slightly_low: format!("{sensor_type} slightly low"),
        }
    }
}

/// Rule for a single sensor type
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRule {
    /// Hard lower limit (unbounded if `None`)
    pub min: Option<f64>,
    /// Hard upper limit (unbounded if `None`)
    pub max: Option<f64>,
    /// Soft lower threshold
    pub soft_min: Option<f64>,
    /// Soft upper threshold
    pub soft_max: Option<f64>,
    /// Points removed on a hard breach
    pub hard_deduction: u32,
    /// Points removed on a soft breach
    pub soft_deduction: u32,
    /// Alert texts
    pub alerts: RuleAlerts,
}

impl SensorRule {
    /// Unbounded rule with default deductions and generic alert texts
    pub fn new(sensor_type: &SensorType) -> Self {
        Self {
            min: None,
            max: None,
            soft_min: None,
            soft_max: None,
            hard_deduction: DEFAULT_HARD_DEDUCTION,
            soft_deduction: DEFAULT_SOFT_DEDUCTION,
            alerts: RuleAlerts::generic(sensor_type),
        }
    }

    /// Two-sided rule with soft thresholds derived from ratios
    ///
    /// `soft_max = max * soft_max_ratio` and
    /// `soft_min = min + (max - min) * soft_min_ratio`.
    pub fn from_ratios(
        sensor_type: &SensorType,
        min: f64,
        max: f64,
        soft_min_ratio: f64,
        soft_max_ratio: f64,
    ) -> Self {
        // Swap rather than reject an inverted band
        let (min, max) = if min > max { (max, min) } else { (min, max) };

        Self::new(sensor_type)
            .with_max(max, max * soft_max_ratio)
            .with_min(min, min + (max - min) * soft_min_ratio)
    }

    /// Two-sided rule using the default soft ratios
    pub fn from_band(sensor_type: SensorType, min: f64, max: f64) -> Self {
        Self::from_ratios(
            &sensor_type,
            min,
            max,
            DEFAULT_SOFT_MIN_RATIO,
            DEFAULT_SOFT_MAX_RATIO,
        )
    }

    /// Standard temperature rule: overheating only
    pub fn temperature() -> Self {
        Self::new(&SensorType::Temperature)
            .with_max(120.0, 100.0)
            .with_high_alerts("High Temperature Risk", "Temperature slightly above safe limit")
    }

    /// Standard pressure rule: pressure loss only
    pub fn pressure() -> Self {
        Self::new(&SensorType::Pressure)
            .with_min(30.0, 40.0)
            .with_low_alerts("Low Pressure Risk", "Pressure slightly below safe limit")
    }

    /// Standard vibration rule: excess vibration only, weighted heavier
    pub fn vibration() -> Self {
        Self::new(&SensorType::Vibration)
            .with_max(90.0, 70.0)
            .with_deductions(50, 25)
            .with_high_alerts("Extreme Vibration Risk", "Vibration slightly high")
    }

    /// Set the upper hard limit and soft threshold
    pub fn with_max(mut self, max: f64, soft_max: f64) -> Self {
        self.max = Some(max);
        self.soft_max = Some(soft_max);
        self
    }

    /// Set the lower hard limit and soft threshold
    pub fn with_min(mut self, min: f64, soft_min: f64) -> Self {
        self.min = Some(min);
        self.soft_min = Some(soft_min);
        self
    }

    /// Set hard and soft deductions
    pub fn with_deductions(mut self, hard: u32, soft: u32) -> Self {
        self.hard_deduction = hard;
        self.soft_deduction = soft;
        self
    }

    /// Set alert texts for the high side
    pub fn with_high_alerts(mut self, hard: impl Into<String>, soft: impl Into<String>) -> Self {
        self.alerts.high = hard.into();
        self.alerts.slightly_high = soft.into();
        self
    }

    /// Set alert texts for the low side
    pub fn with_low_alerts(mut self, hard: impl Into<String>, soft: impl Into<String>) -> Self {
        self.alerts.low = hard.into();
        self.alerts.slightly_low = soft.into();
        self
    }

    /// Evaluate one reading. At most one violation is reported; hard limits
    /// are checked before soft ones, high before low.
    pub fn evaluate(&self, value: f64) -> Option<Violation<'_>> {
        let above = |limit: Option<f64>| limit.is_some_and(|limit| value > limit);
        let below = |limit: Option<f64>| limit.is_some_and(|limit| value < limit);

        let (severity, direction, alert) = if above(self.max) {
            (Severity::Hard, Direction::High, &self.alerts.high)
        } else if below(self.min) {
            (Severity::Hard, Direction::Low, &self.alerts.low)
        } else if above(self.soft_max) {
            (Severity::Soft, Direction::High, &self.alerts.slightly_high)
        } else if below(self.soft_min) {
            (Severity::Soft, Direction::Low, &self.alerts.slightly_low)
        } else {
            return None;
        };

        let deduction = match severity {
            Severity::Hard => self.hard_deduction,
            Severity::Soft => self.soft_deduction,
        };

        Some(Violation {
            severity,
            direction,
            deduction,
            alert: alert.as_str(),
        })
    }
}

/// Mapping from sensor type to rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: HashMap<SensorType, SensorRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleTable {
    /// Table with no rules; every type is unknown to it
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// The standard factory-floor table
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(SensorType::Temperature, SensorRule::temperature())
            .with_rule(SensorType::Pressure, SensorRule::pressure())
            .with_rule(SensorType::Vibration, SensorRule::vibration())
    }

    /// Add or replace the rule for a type
    pub fn with_rule(mut self, sensor_type: SensorType, rule: SensorRule) -> Self {
        self.rules.insert(sensor_type, rule);
        self
    }

    /// Look up the rule for a type
    pub fn rule(&self, sensor_type: &SensorType) -> Option<&SensorRule> {
        self.rules.get(sensor_type)
    }

    /// Number of types with a rule
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no type has a rule
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
