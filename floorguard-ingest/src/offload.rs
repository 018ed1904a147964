//! Offloaded ingestion
//!
//! Parsing runs on tokio's blocking pool. The worker owns a private staging
//! registry and communicates with the caller through one JSON request and
//! one JSON reply:
//!
//! ```text
//! request   {"path": "machines.csv"}
//! success   {"M1": [{"type": "Temperature", "reading": 85.0, "sensorId": "T1"}, ...]}
//! failure   {"error": "CSV file is empty", "code": "empty_source"}
//! ```
//!
//! Failure replies carry the error variant's fields next to `code`, so the
//! caller gets back the same [`IngestError`] the worker saw. Machines in a
//! success reply are keyed in sorted order; the order of readings within a
//! machine is preserved.
//!
//! The caller commits the whole reply to its registry only after it has
//! been received and validated. A failure, a cancellation or a malformed
//! reply commits nothing.

use std::collections::BTreeMap;
use std::path::Path;

use floorguard_core::{parse_reading, FactoryRegistry, SensorReading, SensorType};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};
use crate::pipeline::IngestReport;
use crate::sync::SyncIngestor;

/// Request sent to the worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffloadRequest {
    /// Source to ingest
    pub path: String,
}

/// One reading on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingMessage {
    /// Sensor type label
    #[serde(rename = "type")]
    pub sensor_type: String,
    /// Reading value
    pub reading: f64,
    /// Sensor id, when the source had one
    #[serde(rename = "sensorId", default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
}

impl From<&SensorReading> for ReadingMessage {
    fn from(reading: &SensorReading) -> Self {
        Self {
            sensor_type: reading.sensor_type().to_string(),
            reading: reading.value(),
            sensor_id: Some(reading.sensor_id().to_string()),
        }
    }
}

/// Worker reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OffloadResponse {
    /// Ingestion failed as a whole
    Failure {
        /// Human-readable message
        error: String,
        /// Machine-readable cause, flattened next to `error`
        #[serde(flatten)]
        cause: Option<IngestError>,
    },
    /// Readings per machine
    Success(BTreeMap<String, Vec<ReadingMessage>>),
}

impl OffloadResponse {
    fn failure(err: IngestError) -> Self {
        OffloadResponse::Failure {
            error: err.to_string(),
            cause: Some(err),
        }
    }

    fn from_registry(registry: &FactoryRegistry) -> Self {
        let machines = registry
            .iter()
            .map(|machine| {
                let readings = machine.readings().iter().map(ReadingMessage::from).collect();
                (machine.id().to_string(), readings)
            })
            .collect();

        OffloadResponse::Success(machines)
    }
}

/// Worker entry point: decode a request, ingest into a staging registry and
/// encode the reply
pub fn serve(request: &str, config: &IngestConfig) -> String {
    let response = match serde_json::from_str::<OffloadRequest>(request) {
        Ok(request) => {
            let mut staging = FactoryRegistry::new();
            match SyncIngestor::new(config.clone()).run_path(&request.path, &mut staging) {
                Ok(_) => OffloadResponse::from_registry(&staging),
                Err(err) => OffloadResponse::failure(err),
            }
        }
        Err(err) => OffloadResponse::failure(IngestError::worker(format!("bad request: {err}"))),
    };

    serde_json::to_string(&response).unwrap_or_else(|err| {
        serde_json::json!({ "error": format!("could not encode reply: {err}") }).to_string()
    })
}

/// Decode a worker reply into a staging registry
///
/// Every reading is revalidated; any invalid entry rejects the whole reply.
pub fn decode_reply(reply: &str) -> IngestResult<FactoryRegistry> {
    let response: OffloadResponse = serde_json::from_str(reply)
        .map_err(|err| IngestError::worker(format!("malformed reply: {err}")))?;

    let machines = match response {
        OffloadResponse::Failure { error, cause } => {
            return Err(cause.unwrap_or(IngestError::Worker { message: error }));
        }
        OffloadResponse::Success(machines) => machines,
    };

    let mut staging = FactoryRegistry::new();
    for (machine_id, messages) in machines {
        for message in messages {
            let sensor_type = SensorType::from_label(&message.sensor_type);
            let sensor_id = message
                .sensor_id
                .unwrap_or_else(|| sensor_type.name().to_ascii_lowercase());
            let reading = parse_reading(&sensor_type, message.reading)
                .and_then(|value| SensorReading::new(sensor_id, sensor_type, value))
                .map_err(|err| IngestError::worker(format!("machine {machine_id}: {err}")))?;
            staging.add_reading(&machine_id, reading);
        }
    }

    if staging.is_empty() {
        return Err(IngestError::NoValidRows);
    }

    Ok(staging)
}

/// Ingests a file on the blocking pool and commits the result in one step
#[derive(Debug, Clone, Default)]
pub struct OffloadIngestor {
    config: IngestConfig,
}

impl OffloadIngestor {
    /// Create an ingestor
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Submit `path` to a worker and commit its reply
    ///
    /// Only machine and reading counts are reported; row counters and row
    /// errors stay on the worker side, where skipped rows are logged, so
    /// [`IngestReport::has_row_detail`] is false.
    pub async fn run(
        &self,
        path: impl AsRef<Path>,
        registry: &mut FactoryRegistry,
        cancel: &CancellationToken,
    ) -> IngestResult<IngestReport> {
        if cancel.is_cancelled() {
            return Err(IngestError::Cancelled { rows_applied: 0 });
        }

        let request = serde_json::to_string(&OffloadRequest {
            path: path.as_ref().display().to_string(),
        })
        .map_err(IngestError::worker)?;
        let config = self.config.clone();

        log::debug!("dispatching {} to ingestion worker", path.as_ref().display());
        let worker = tokio::task::spawn_blocking(move || serve(&request, &config));

        // A cancelled worker runs to completion; its reply is dropped.
        let reply = tokio::select! {
            _ = cancel.cancelled() => {
                log::info!("offloaded ingestion cancelled before reply");
                return Err(IngestError::Cancelled { rows_applied: 0 });
            }
            joined = worker => joined.map_err(|err| IngestError::worker(format!("worker stopped: {err}")))?,
        };

        let staging = decode_reply(&reply)?;
        let report = IngestReport {
            readings_applied: staging.reading_count(),
            batches: 1,
            machines: staging.iter().map(|machine| machine.id().to_string()).collect(),
            ..IngestReport::default()
        };

        registry.absorb(staging);
        log::info!(
            "committed {} readings for {} machines from worker",
            report.readings_applied,
            report.machines.len()
        );

        Ok(report)
    }
}
