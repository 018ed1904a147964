//! Strategy selection
//!
//! Every ingestion strategy implements [`Ingestor`], so callers can pick one
//! at runtime and drive it the same way.
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use floorguard_core::FactoryRegistry;
//! use floorguard_ingest::{IngestConfig, Strategy};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> Result<(), floorguard_ingest::IngestError> {
//! let ingestor = Strategy::Batched.build(IngestConfig::default());
//! let mut registry = FactoryRegistry::new();
//! let report = ingestor
//!     .ingest(Path::new("machines.csv"), &mut registry, &CancellationToken::new())
//!     .await?;
//! println!("{} machines", report.machines.len());
//! # Ok(())
//! # }
//! ```

use core::fmt;
use core::str::FromStr;
use std::path::Path;

use async_trait::async_trait;
use floorguard_core::FactoryRegistry;
use tokio_util::sync::CancellationToken;

use crate::batched::BatchedIngestor;
use crate::config::{IngestConfig, ParseConfigError};
use crate::error::IngestResult;
use crate::offload::OffloadIngestor;
use crate::pipeline::IngestReport;
use crate::sync::SyncIngestor;

/// Common interface of the ingestion strategies
#[async_trait]
pub trait Ingestor: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Ingest the file at `path` into `registry`
    async fn ingest(
        &self,
        path: &Path,
        registry: &mut FactoryRegistry,
        cancel: &CancellationToken,
    ) -> IngestResult<IngestReport>;
}

#[async_trait]
impl Ingestor for SyncIngestor {
    fn name(&self) -> &'static str {
        "sync"
    }

    async fn ingest(
        &self,
        path: &Path,
        registry: &mut FactoryRegistry,
        _cancel: &CancellationToken,
    ) -> IngestResult<IngestReport> {
        self.run_path(path, registry)
    }
}

#[async_trait]
impl Ingestor for BatchedIngestor {
    fn name(&self) -> &'static str {
        "batched"
    }

    async fn ingest(
        &self,
        path: &Path,
        registry: &mut FactoryRegistry,
        cancel: &CancellationToken,
    ) -> IngestResult<IngestReport> {
        self.run_path(path, registry, cancel).await
    }
}

#[async_trait]
impl Ingestor for OffloadIngestor {
    fn name(&self) -> &'static str {
        "offload"
    }

    async fn ingest(
        &self,
        path: &Path,
        registry: &mut FactoryRegistry,
        cancel: &CancellationToken,
    ) -> IngestResult<IngestReport> {
        self.run(path, registry, cancel).await
    }
}

/// Available strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Blocking single pass
    #[default]
    Sync,
    /// Cooperative batches with a yield between each
    Batched,
    /// Parsed on the blocking pool, committed in one step
    Offload,
}

impl Strategy {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Strategy::Sync => "sync",
            Strategy::Batched => "batched",
            Strategy::Offload => "offload",
        }
    }

    /// Build the strategy with a configuration
    pub fn build(self, config: IngestConfig) -> Box<dyn Ingestor> {
        match self {
            Strategy::Sync => Box::new(SyncIngestor::new(config)),
            Strategy::Batched => Box::new(BatchedIngestor::new(config)),
            Strategy::Offload => Box::new(OffloadIngestor::new(config)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sync" => Ok(Strategy::Sync),
            "batched" => Ok(Strategy::Batched),
            "offload" => Ok(Strategy::Offload),
            _ => Err(ParseConfigError {
                what: "strategy",
                value: s.to_string(),
            }),
        }
    }
}
