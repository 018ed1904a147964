//! Command-line and environment settings
//!
//! Flags win over `FLOORGUARD_*` environment variables, which win over
//! defaults.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use floorguard_ingest::{IngestConfig, SchemaSelection, Strategy, DEFAULT_BATCH_SIZE};

/// Source read when no path is given
pub const DEFAULT_PATH: &str = "machines.csv";

pub const USAGE: &str = "\
Usage: floorguard [PATH] [OPTIONS]

Arguments:
  PATH                  CSV source (default: machines.csv)

Options:
  --schema <SCHEMA>     wide, long or auto (default: auto)
  --strategy <NAME>     sync, batched or offload (default: sync)
  --batch-size <N>      rows per batch for the batched strategy (default: 20)
  --json                print the report as JSON
  -h, --help            print this help

Environment:
  FLOORGUARD_PATH, FLOORGUARD_SCHEMA, FLOORGUARD_STRATEGY, FLOORGUARD_BATCH_SIZE
  RUST_LOG              log filter (default: floorguard=info)";

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub path: PathBuf,
    pub schema: SchemaSelection,
    pub strategy: Strategy,
    pub batch_size: usize,
    pub json: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse from process arguments and environment
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1), |name| std::env::var(name).ok())
    }

    /// Parse `args` (program name excluded), falling back to `env` lookups
    pub fn parse<I, E>(args: I, env: E) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut path = None;
        let mut schema = None;
        let mut strategy = None;
        let mut batch_size = None;
        let mut json = false;
        let mut help = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--schema" => schema = Some(value_of(&mut args, "--schema")?),
                "--strategy" => strategy = Some(value_of(&mut args, "--strategy")?),
                "--batch-size" => batch_size = Some(value_of(&mut args, "--batch-size")?),
                "--json" => json = true,
                "-h" | "--help" => help = true,
                flag if flag.starts_with('-') => bail!("unknown option `{flag}`"),
                _ if path.is_some() => bail!("unexpected argument `{arg}`"),
                _ => path = Some(arg),
            }
        }

        let path = path
            .or_else(|| env("FLOORGUARD_PATH"))
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        let schema = match schema.or_else(|| env("FLOORGUARD_SCHEMA")) {
            Some(value) => value.parse()?,
            None => SchemaSelection::default(),
        };

        let strategy = match strategy.or_else(|| env("FLOORGUARD_STRATEGY")) {
            Some(value) => value.parse()?,
            None => Strategy::default(),
        };

        let batch_size = match batch_size.or_else(|| env("FLOORGUARD_BATCH_SIZE")) {
            Some(value) => {
                let size: usize = value
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid batch size `{value}`"))?;
                if size == 0 {
                    bail!("batch size must be at least 1");
                }
                size
            }
            None => DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            path: PathBuf::from(path),
            schema,
            strategy,
            batch_size,
            json,
            help,
        })
    }

    /// Ingestion settings for these arguments
    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig::new()
            .schema(self.schema)
            .batch_size(self.batch_size)
    }
}

fn value_of(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    match args.next() {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => bail!("{flag} requires a value"),
    }
}
