//! Ingestion pipeline for FloorGuard
//!
//! Loads CSV machine readings into a [`FactoryRegistry`](floorguard_core::FactoryRegistry).
//!
//! ## Strategies
//!
//! | Strategy | Entry point | Behaviour |
//! |----------|-------------|-----------|
//! | [`SyncIngestor`] | `run` | One blocking pass |
//! | [`BatchedIngestor`] | `run(..).await` | Yields after each batch, cancellable |
//! | [`OffloadIngestor`] | `run(..).await` | Parsed on the blocking pool, committed in one step |
//!
//! [`ReadingFeed`] appends readings from a producer on a fixed period
//! instead of from a file.
//!
//! All three file strategies share the same row semantics (see
//! [`pipeline`]) and the same error taxonomy (see [`error`]).
//!
//! ## Example
//!
//! ```rust
//! use floorguard_core::FactoryRegistry;
//! use floorguard_ingest::{IngestConfig, RowSource, SyncIngestor};
//!
//! let source = RowSource::from_text(
//!     "machineId,sensorId,type,reading\nM1,T1,Temperature,85\nM1,P1,Pressure,oops\n",
//! )?;
//! let mut registry = FactoryRegistry::new();
//!
//! let report = SyncIngestor::new(IngestConfig::default()).run(&source, &mut registry)?;
//! assert_eq!(report.rows_applied, 1);
//! assert_eq!(report.row_errors[0].line, 3);
//! # Ok::<(), floorguard_ingest::IngestError>(())
//! ```
//!
//! ## Features
//!
//! - `async` (default): the batched and offloaded strategies, the
//!   [`Ingestor`] trait and the periodic reading feed, built on tokio

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod sync;

#[cfg(feature = "async")]
pub mod batched;
#[cfg(feature = "async")]
pub mod offload;
#[cfg(feature = "async")]
pub mod strategy;
#[cfg(feature = "async")]
pub mod stream;

// Public API
pub use config::{IngestConfig, ParseConfigError, Schema, SchemaSelection, DEFAULT_BATCH_SIZE};
pub use error::{IngestError, IngestResult, RowError, RowErrorKind};
pub use pipeline::{IngestReport, ParsedRow, RowParser};
pub use source::{Header, RowSource, SourceRow};
pub use sync::SyncIngestor;

#[cfg(feature = "async")]
pub use batched::BatchedIngestor;
#[cfg(feature = "async")]
pub use offload::{OffloadIngestor, OffloadRequest, OffloadResponse, ReadingMessage};
#[cfg(feature = "async")]
pub use strategy::{Ingestor, Strategy};
#[cfg(feature = "async")]
pub use stream::{ReadingFeed, ReadingProducer, SimulatedMachine};
