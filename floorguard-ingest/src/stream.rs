//! Periodic reading feed
//!
//! Appends readings to a live registry on a fixed period instead of from a
//! file. Each tick asks a [`ReadingProducer`] for the readings of that tick
//! and appends every one of them whole, through the same
//! [`FactoryRegistry::add_reading`] path the file strategies use.
//!
//! The first tick fires one period after the feed starts. Cancellation is
//! checked before every tick; ticks already applied stay applied.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use floorguard_core::FactoryRegistry;
//! use floorguard_ingest::stream::{ReadingFeed, SimulatedMachine};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), floorguard_ingest::IngestError> {
//! let feed = ReadingFeed::new(Duration::from_millis(1), 3);
//! let mut producer = SimulatedMachine::new("M3", 7);
//! let mut registry = FactoryRegistry::new();
//!
//! let report = feed.run(&mut producer, &mut registry, &CancellationToken::new()).await?;
//! assert_eq!(report.readings_applied, 9);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use floorguard_core::{FactoryRegistry, SensorReading, SensorType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::{IngestError, IngestResult};
use crate::pipeline::IngestReport;

/// Time between ticks when not configured
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(200);

/// Ticks per run when not configured
pub const DEFAULT_ITERATIONS: usize = 10;

/// Source of readings for a periodic feed
pub trait ReadingProducer: Send {
    /// Readings for tick `tick` (0-based), as `(machine id, reading)` pairs
    fn produce(&mut self, tick: usize) -> Vec<(String, SensorReading)>;
}

impl<F> ReadingProducer for F
where
    F: FnMut(usize) -> Vec<(String, SensorReading)> + Send,
{
    fn produce(&mut self, tick: usize) -> Vec<(String, SensorReading)> {
        self(tick)
    }
}

/// One simulated machine reporting a full sensor set every tick
///
/// Temperature is drawn from 80..110, pressure from 90..110 and vibration
/// from 0..100. Sensor ids are `T<tick>`, `P<tick>` and `V<tick>`.
#[derive(Debug, Clone)]
pub struct SimulatedMachine {
    machine_id: String,
    rng: StdRng,
}

impl SimulatedMachine {
    /// Simulate `machine_id` with a reproducible seed
    pub fn new(machine_id: impl Into<String>, seed: u64) -> Self {
        Self {
            machine_id: machine_id.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Machine being simulated
    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }
}

impl ReadingProducer for SimulatedMachine {
    fn produce(&mut self, tick: usize) -> Vec<(String, SensorReading)> {
        let samples = [
            ('T', SensorType::Temperature, self.rng.gen_range(80.0..110.0)),
            ('P', SensorType::Pressure, self.rng.gen_range(90.0..110.0)),
            ('V', SensorType::Vibration, self.rng.gen_range(0.0..100.0)),
        ];

        samples
            .into_iter()
            .filter_map(|(prefix, sensor_type, value)| {
                SensorReading::new(format!("{prefix}{tick}"), sensor_type, value)
                    .ok()
                    .map(|reading| (self.machine_id.clone(), reading))
            })
            .collect()
    }
}

/// Drives a producer on a fixed period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingFeed {
    period: Duration,
    iterations: usize,
}

impl Default for ReadingFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD, DEFAULT_ITERATIONS)
    }
}

impl ReadingFeed {
    /// Feed ticking every `period`, `iterations` times; a zero period is
    /// raised to one millisecond
    pub fn new(period: Duration, iterations: usize) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            iterations,
        }
    }

    /// Time between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks per run
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run every tick, appending the producer's readings to `registry`
    ///
    /// Each tick counts as one batch; each reading as one applied row.
    pub async fn run<P>(
        &self,
        producer: &mut P,
        registry: &mut FactoryRegistry,
        cancel: &CancellationToken,
    ) -> IngestResult<IngestReport>
    where
        P: ReadingProducer + ?Sized,
    {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut report = IngestReport::default();

        for tick in 0..self.iterations {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::info!("reading feed cancelled after {} ticks", tick);
                    return Err(IngestError::Cancelled {
                        rows_applied: report.rows_applied,
                    });
                }
                _ = ticker.tick() => {}
            }

            let readings = producer.produce(tick);
            report.rows_read += readings.len();
            for (machine_id, reading) in readings {
                if !report.machines.contains(&machine_id) {
                    report.machines.push(machine_id.clone());
                }
                registry.add_reading(&machine_id, reading);
                report.rows_applied += 1;
                report.readings_applied += 1;
            }
            report.batches += 1;
            log::debug!("feed tick {} applied", tick);
        }

        log::info!(
            "reading feed complete: {} readings over {} ticks",
            report.readings_applied,
            report.batches
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_machine_stays_in_range() {
        let mut machine = SimulatedMachine::new("M3", 42);

        for tick in 0..50 {
            let readings = machine.produce(tick);
            assert_eq!(readings.len(), 3);

            for (id, reading) in &readings {
                assert_eq!(id, "M3");
                let range = match reading.sensor_type() {
                    SensorType::Temperature => 80.0..110.0,
                    SensorType::Pressure => 90.0..110.0,
                    _ => 0.0..100.0,
                };
                assert!(range.contains(&reading.value()));
            }
            assert_eq!(readings[0].1.sensor_id(), format!("T{tick}"));
        }
    }

    #[test]
    fn same_seed_same_readings() {
        let a = SimulatedMachine::new("M3", 9).produce(0);
        let b = SimulatedMachine::new("M3", 9).produce(0);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_period_is_raised() {
        assert_eq!(ReadingFeed::new(Duration::ZERO, 3).period(), Duration::from_millis(1));
        assert_eq!(ReadingFeed::default().iterations(), DEFAULT_ITERATIONS);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_on_the_period() {
        let feed = ReadingFeed::new(Duration::from_millis(200), 5);
        let mut producer = SimulatedMachine::new("M3", 1);
        let mut registry = FactoryRegistry::new();
        let start = Instant::now();

        let report = feed
            .run(&mut producer, &mut registry, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(1000));
        assert_eq!(report.batches, 5);
        assert_eq!(report.readings_applied, 15);
        assert_eq!(report.machines, vec!["M3"]);
        assert_eq!(registry.get("M3").unwrap().sensor_count(), 15);
    }
}
