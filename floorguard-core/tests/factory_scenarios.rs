//! Factory-level scenarios: registry, scoring and reporting together

mod common;

use floorguard_core::{FactoryAggregator, MachineScorer, RuleTable, SensorRule, SensorType};

#[test]
fn mixed_floor_report() {
    let registry = common::registry(&[
        ("press-1", &[("Temperature", 80.0), ("Pressure", 90.0), ("Vibration", 20.0)]),
        ("press-2", &[("Temperature", 110.0), ("Pressure", 50.0), ("Vibration", 70.0)]),
        ("lathe-1", &[("Temperature", 85.0), ("Vibration", 95.0)]),
    ]);

    let report = FactoryAggregator::default().report(&registry);

    let press_1 = report.machine("press-1").unwrap();
    assert_eq!(press_1.result.score, 100);
    assert!(press_1.result.alerts.is_empty());

    let lathe = report.machine("lathe-1").unwrap();
    assert_eq!(lathe.result.score, 0);
    assert_eq!(lathe.result.alerts, vec!["Sensor Offline Warning: Missing Pressure"]);

    assert_eq!(report.average_health, 60.0);
    assert_eq!(report.health.min, 0.0);
    assert_eq!(report.health.max, 100.0);

    let vibration = report.sensor_stats[&SensorType::Vibration];
    assert_eq!(vibration.min, 20.0);
    assert_eq!(vibration.max, 95.0);
}

#[test]
fn custom_rules_flow_through_aggregator() {
    let strict_temperature = SensorRule::temperature().with_max(90.0, 80.0);
    let rules = RuleTable::standard().with_rule(SensorType::Temperature, strict_temperature);
    let aggregator = FactoryAggregator::new(MachineScorer::new(rules));

    let registry = common::registry(&[(
        "oven",
        &[("Temperature", 85.0), ("Pressure", 90.0), ("Vibration", 20.0)],
    )]);

    let report = aggregator.report(&registry);
    let oven = report.machine("oven").unwrap();
    assert_eq!(oven.result.score, 80);
    assert_eq!(oven.result.alerts, vec!["Temperature slightly above safe limit"]);
}

#[test]
fn readings_appended_after_scoring_change_the_score() {
    let mut registry = common::registry(&[(
        "M1",
        &[("Temperature", 80.0), ("Pressure", 90.0), ("Vibration", 20.0)],
    )]);
    let scorer = MachineScorer::default();
    assert_eq!(scorer.health(registry.get("M1").unwrap()), 100);

    let late = floorguard_core::SensorReading::new("T1", SensorType::Temperature, 125.0).unwrap();
    registry.add_reading("M1", late);
    assert_eq!(scorer.health(registry.get("M1").unwrap()), 60);
}
