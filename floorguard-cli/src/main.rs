//! `floorguard` -- factory machine health report.
//!
//! Loads a CSV of sensor readings with the chosen ingestion strategy and
//! prints per-machine health scores, alerts and factory averages.
//!
//! # Environment variables
//!
//! | Variable                | Default        | Description                   |
//! |-------------------------|----------------|-------------------------------|
//! | `FLOORGUARD_PATH`       | `machines.csv` | CSV source                    |
//! | `FLOORGUARD_SCHEMA`     | `auto`         | `wide`, `long` or `auto`      |
//! | `FLOORGUARD_STRATEGY`   | `sync`         | `sync`, `batched`, `offload`  |
//! | `FLOORGUARD_BATCH_SIZE` | `20`           | Rows per cooperative batch    |
//! | `RUST_LOG`              | `floorguard=info` | Log filter                 |
//!
//! Command-line flags take precedence. A `.env` file in the working
//! directory is read first.

mod args;
mod render;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use floorguard_core::{FactoryAggregator, FactoryRegistry};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::CliArgs;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floorguard=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<()> {
    let args = CliArgs::from_env()?;
    if args.help {
        println!("{}", args::USAGE);
        return Ok(());
    }

    let ingestor = args.strategy.build(args.ingest_config());
    log::debug!(
        "loading {} with {} strategy",
        args.path.display(),
        ingestor.name()
    );

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("interrupt received, cancelling ingestion");
                cancel.cancel();
            }
        }
    });

    let mut registry = FactoryRegistry::new();
    let ingest = ingestor
        .ingest(&args.path, &mut registry, &cancel)
        .await?;

    let report = FactoryAggregator::default().report(&registry);
    let output = if args.json {
        render::json(&ingest, &report)?
    } else {
        render::text(&ingest, &report)
    };
    println!("{output}");

    Ok(())
}
