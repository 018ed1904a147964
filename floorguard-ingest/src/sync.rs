//! Blocking ingestion
//!
//! Reads the whole source and applies every row before returning. The
//! calling thread is occupied for the full duration.

use std::path::Path;

use floorguard_core::FactoryRegistry;

use crate::config::IngestConfig;
use crate::error::IngestResult;
use crate::pipeline::{IngestReport, Ingestion};
use crate::source::RowSource;

/// Ingests a source in one uninterrupted pass
#[derive(Debug, Clone, Default)]
pub struct SyncIngestor {
    config: IngestConfig,
}

impl SyncIngestor {
    /// Create an ingestor
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Apply every row of an already-tokenized source
    pub fn run(&self, source: &RowSource, registry: &mut FactoryRegistry) -> IngestResult<IngestReport> {
        let mut ingestion = Ingestion::begin(source, &self.config, registry)?;
        ingestion.apply_batch(0, source.rows());
        ingestion.finish()
    }

    /// Read a file and apply every row
    pub fn run_path(&self, path: impl AsRef<Path>, registry: &mut FactoryRegistry) -> IngestResult<IngestReport> {
        let source = RowSource::from_path(path)?;
        self.run(&source, registry)
    }
}
