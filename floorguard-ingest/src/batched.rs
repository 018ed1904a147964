//! Cooperative batched ingestion
//!
//! Applies rows in fixed-size batches and yields to the runtime after each
//! one, so other tasks on the same executor keep making progress during a
//! large import. Row order is preserved across batches.
//!
//! The cancellation token is checked at every batch boundary. Batches
//! applied before the cancellation stay applied; the call then returns
//! [`IngestError::Cancelled`] with the number of rows committed.

use std::path::Path;

use floorguard_core::FactoryRegistry;
use tokio_util::sync::CancellationToken;

use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};
use crate::pipeline::{IngestReport, Ingestion};
use crate::source::RowSource;

/// Ingests a source in batches, yielding between them
#[derive(Debug, Clone, Default)]
pub struct BatchedIngestor {
    config: IngestConfig,
}

impl BatchedIngestor {
    /// Create an ingestor
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Apply every row of an already-tokenized source, batch by batch
    pub async fn run(
        &self,
        source: &RowSource,
        registry: &mut FactoryRegistry,
        cancel: &CancellationToken,
    ) -> IngestResult<IngestReport> {
        let batch_size = self.config.batch_size.max(1);
        let mut ingestion = Ingestion::begin(source, &self.config, registry)?;

        for (batch, rows) in source.rows().chunks(batch_size).enumerate() {
            if cancel.is_cancelled() {
                let rows_applied = ingestion.rows_applied();
                log::info!("ingestion cancelled at batch {} after {} rows", batch, rows_applied);
                return Err(IngestError::Cancelled { rows_applied });
            }

            ingestion.apply_batch(batch * batch_size, rows);
            log::debug!("applied batch {} ({} rows)", batch, rows.len());

            tokio::task::yield_now().await;
        }

        ingestion.finish()
    }

    /// Read a file and apply it batch by batch
    pub async fn run_path(
        &self,
        path: impl AsRef<Path>,
        registry: &mut FactoryRegistry,
        cancel: &CancellationToken,
    ) -> IngestResult<IngestReport> {
        let source = RowSource::from_path(path)?;
        self.run(&source, registry, cancel).await
    }
}
