//! Row-to-reading pipeline shared by every strategy
//!
//! ## Overview
//!
//! ```text
//! RowSource → RowParser → Ingestion → FactoryRegistry
//!               ↓            ↓
//!           RowError     IngestReport
//! ```
//!
//! [`RowParser`] turns one [`SourceRow`] into a [`ParsedRow`] or a
//! [`RowError`]. [`Ingestion`] applies parsed rows to a registry, absorbing
//! row errors, and decides at the end whether the call as a whole
//! succeeded.
//!
//! Rows are atomic: a wide row with one bad reading contributes nothing,
//! and a reading is appended whole or not at all.

use std::collections::HashSet;

use floorguard_core::{parse_reading, FactoryRegistry, SensorReading, SensorType};

use crate::config::{IngestConfig, Schema, SchemaSelection, MACHINE_ID_COLUMN};
use crate::error::{IngestError, IngestResult, RowError, RowErrorKind};
use crate::source::{Header, RowSource, SourceRow};

/// A validated row, ready to append
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// Source line
    pub line: usize,
    /// Target machine
    pub machine_id: String,
    /// Readings in column order
    pub readings: Vec<SensorReading>,
}

/// Summary of one ingestion call
///
/// Row counters and `row_errors` are filled only by strategies that parse
/// in the calling process. The offloaded strategy leaves them empty: its
/// reply carries readings, not rows, and skipped rows are logged by the
/// worker. Use [`IngestReport::has_row_detail`] to tell the cases apart.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IngestReport {
    /// Data rows examined (worker-side only when offloaded)
    pub rows_read: usize,
    /// Rows whose readings were appended (worker-side only when offloaded)
    pub rows_applied: usize,
    /// Readings appended
    pub readings_applied: usize,
    /// Batches applied (one for non-batching strategies)
    pub batches: usize,
    /// Machines touched, in first-seen order
    pub machines: Vec<String>,
    /// Rows skipped and why (worker-side only when offloaded)
    pub row_errors: Vec<RowError>,
}

impl IngestReport {
    /// Number of rows skipped
    pub fn rows_skipped(&self) -> usize {
        self.row_errors.len()
    }

    /// Whether row counters were collected by this call
    pub fn has_row_detail(&self) -> bool {
        self.rows_read > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Columns {
    Wide {
        machine_id: Option<usize>,
        temperature: usize,
        pressure: usize,
        vibration: usize,
    },
    Long {
        machine_id: usize,
        sensor_id: usize,
        sensor_type: usize,
        reading: usize,
    },
}

/// Columns that only appear in the long schema
const LONG_ONLY_COLUMNS: [&str; 3] = ["sensorId", "type", "reading"];

/// Resolve a schema selection against a header
///
/// `Auto` picks Long as soon as any long-only column is present, so a
/// partial long header is reported against the long schema.
pub fn resolve_schema(selection: SchemaSelection, header: &Header) -> Schema {
    match selection {
        SchemaSelection::Wide => Schema::Wide,
        SchemaSelection::Long => Schema::Long,
        SchemaSelection::Auto => {
            if LONG_ONLY_COLUMNS.iter().any(|column| header.contains(column)) {
                Schema::Long
            } else {
                Schema::Wide
            }
        }
    }
}

/// Parses rows of one source according to its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowParser {
    schema: Schema,
    columns: Columns,
}

impl RowParser {
    /// Build a parser for a header, failing if required columns are missing
    pub fn new(header: &Header, selection: SchemaSelection) -> IngestResult<Self> {
        let schema = resolve_schema(selection, header);
        let missing = header.missing(schema.required_columns());
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns { missing });
        }

        // Presence checked above
        let at = |name: &str| header.position(name).unwrap_or_default();
        let columns = match schema {
            Schema::Wide => Columns::Wide {
                machine_id: header.position(MACHINE_ID_COLUMN),
                temperature: at("temperature"),
                pressure: at("pressure"),
                vibration: at("vibration"),
            },
            Schema::Long => Columns::Long {
                machine_id: at("machineId"),
                sensor_id: at("sensorId"),
                sensor_type: at("type"),
                reading: at("reading"),
            },
        };

        Ok(Self { schema, columns })
    }

    /// Schema in use
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Parse one data row; `index` is its 0-based position among data rows
    pub fn parse(&self, index: usize, row: &SourceRow) -> Result<ParsedRow, RowError> {
        match self.columns {
            Columns::Wide {
                machine_id,
                temperature,
                pressure,
                vibration,
            } => {
                let machine_id = match machine_id {
                    Some(column) => required(row, column, MACHINE_ID_COLUMN)?.to_string(),
                    None => index.to_string(),
                };

                let mut readings = Vec::with_capacity(3);
                for (column, sensor_type) in [
                    (temperature, SensorType::Temperature),
                    (pressure, SensorType::Pressure),
                    (vibration, SensorType::Vibration),
                ] {
                    let sensor_id = sensor_type.name().to_ascii_lowercase();
                    let raw = required(row, column, &sensor_id)?;
                    let value = parse_reading(&sensor_type, raw)
                        .map_err(|err| RowError::new(row.line, err))?;
                    let reading = SensorReading::new(sensor_id, sensor_type, value)
                        .map_err(|err| RowError::new(row.line, err))?;
                    readings.push(reading);
                }

                Ok(ParsedRow {
                    line: row.line,
                    machine_id,
                    readings,
                })
            }
            Columns::Long {
                machine_id,
                sensor_id,
                sensor_type,
                reading,
            } => {
                let machine_id = required(row, machine_id, "machineId")?;
                let sensor_id = required(row, sensor_id, "sensorId")?;
                let sensor_type = SensorType::from_label(required(row, sensor_type, "type")?);
                let raw = required(row, reading, "reading")?;

                let value = parse_reading(&sensor_type, raw)
                    .map_err(|err| RowError::new(row.line, err))?;
                let reading = SensorReading::new(sensor_id, sensor_type, value)
                    .map_err(|err| RowError::new(row.line, err))?;

                Ok(ParsedRow {
                    line: row.line,
                    machine_id: machine_id.to_string(),
                    readings: vec![reading],
                })
            }
        }
    }
}

fn required<'a>(row: &'a SourceRow, column: usize, name: &str) -> Result<&'a str, RowError> {
    row.field(column)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| RowError::new(row.line, RowErrorKind::MissingField(name.to_string())))
}

/// One ingestion call in progress against a registry
///
/// Strategies drive it row by row (or batch by batch) and call
/// [`Ingestion::finish`] once every row has been offered.
pub struct Ingestion<'r> {
    parser: RowParser,
    registry: &'r mut FactoryRegistry,
    report: IngestReport,
    touched: HashSet<String>,
}

impl<'r> Ingestion<'r> {
    /// Start ingesting `source`; fails if the header does not fit the schema
    pub fn begin(
        source: &RowSource,
        config: &IngestConfig,
        registry: &'r mut FactoryRegistry,
    ) -> IngestResult<Self> {
        let parser = RowParser::new(source.header(), config.schema)?;
        log::debug!(
            "ingesting {} rows with {} schema",
            source.len(),
            parser.schema()
        );

        Ok(Self {
            parser,
            registry,
            report: IngestReport::default(),
            touched: HashSet::new(),
        })
    }

    /// Parse and apply one row. Failures are logged and recorded, never
    /// returned.
    pub fn apply(&mut self, index: usize, row: &SourceRow) {
        self.report.rows_read += 1;

        match self.parser.parse(index, row) {
            Ok(parsed) => self.commit(parsed),
            Err(err) => {
                log::warn!("{}", err);
                self.report.row_errors.push(err);
            }
        }
    }

    /// Apply a contiguous slice of rows starting at data-row `offset`
    pub fn apply_batch(&mut self, offset: usize, rows: &[SourceRow]) {
        for (i, row) in rows.iter().enumerate() {
            self.apply(offset + i, row);
        }
        self.report.batches += 1;
    }

    fn commit(&mut self, parsed: ParsedRow) {
        if !self.touched.contains(&parsed.machine_id) {
            self.touched.insert(parsed.machine_id.clone());
            self.report.machines.push(parsed.machine_id.clone());
        }

        self.report.rows_applied += 1;
        self.report.readings_applied += parsed.readings.len();

        let machine = self.registry.machine_mut(&parsed.machine_id);
        for reading in parsed.readings {
            machine.add_reading(reading);
        }
    }

    /// Rows committed so far
    pub fn rows_applied(&self) -> usize {
        self.report.rows_applied
    }

    /// Close the call; fails if no machine received a reading
    pub fn finish(self) -> IngestResult<IngestReport> {
        if self.report.machines.is_empty() {
            return Err(IngestError::NoValidRows);
        }

        log::info!(
            "ingested {} of {} rows into {} machines ({} skipped)",
            self.report.rows_applied,
            self.report.rows_read,
            self.report.machines.len(),
            self.report.rows_skipped()
        );

        Ok(self.report)
    }
}
