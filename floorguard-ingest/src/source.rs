//! CSV row sources
//!
//! Tokenizes comma-separated text into a header and numbered data rows.
//! Structural problems with the source as a whole (missing file, no content,
//! header only) are reported here; what the rows mean is left to the
//! pipeline.
//!
//! ## Format
//!
//! ```csv
//! machineId,sensorId,type,reading
//! M1,T1,Temperature,85.5
//! M1,P1,Pressure,"90"
//! ```
//!
//! - Fields are trimmed and surrounding double quotes stripped
//! - Blank lines are skipped but still counted for line numbers
//! - `\r\n` line endings are accepted
//!
//! ## Example
//!
//! ```rust
//! use floorguard_ingest::source::RowSource;
//!
//! let source = RowSource::from_text("temperature,pressure,vibration\n85,90,20\n")?;
//! assert_eq!(source.len(), 1);
//! assert_eq!(source.rows()[0].line, 2);
//! # Ok::<(), floorguard_ingest::IngestError>(())
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{IngestError, IngestResult};

/// One data row with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// Line in the source, header line included
    pub line: usize,
    /// Trimmed, unquoted fields
    pub fields: Vec<String>,
}

impl SourceRow {
    /// Field at a column index, if present
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Header line of a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Column names as written
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a column, matched case-insensitively
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
    }

    /// Whether a column is present
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Names from `required` the header lacks, in the order given
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect()
    }
}

/// Statistics for a parsed source
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceStats {
    /// Total lines seen, header and blanks included
    pub lines_processed: usize,
    /// Blank lines skipped
    pub blank_lines: usize,
    /// Bytes of text parsed
    pub bytes_read: usize,
}

/// Tokenized CSV source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSource {
    header: Header,
    rows: Vec<SourceRow>,
    stats: SourceStats,
}

impl RowSource {
    /// Read and tokenize a file
    ///
    /// A missing file is `SourceNotFound`; any other read failure is
    /// treated as an empty source.
    pub fn from_path(path: impl AsRef<Path>) -> IngestResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => IngestError::SourceNotFound {
                path: path.display().to_string(),
            },
            _ => {
                log::error!("failed to read {}: {}", path.display(), err);
                IngestError::EmptySource
            }
        })?;

        Self::from_text(&text)
    }

    /// Tokenize text already in memory
    pub fn from_text(text: &str) -> IngestResult<Self> {
        if text.trim().is_empty() {
            return Err(IngestError::EmptySource);
        }

        let mut stats = SourceStats {
            bytes_read: text.len(),
            ..SourceStats::default()
        };
        let mut header = None;
        let mut rows = Vec::new();

        for (index, line) in text.lines().enumerate() {
            stats.lines_processed += 1;

            if line.trim().is_empty() {
                stats.blank_lines += 1;
                continue;
            }

            let fields = split_fields(line);
            if header.is_none() {
                header = Some(Header::new(fields));
            } else {
                rows.push(SourceRow {
                    line: index + 1,
                    fields,
                });
            }
        }

        // Non-blank text always yields a header line
        let header = header.ok_or(IngestError::EmptySource)?;
        if rows.is_empty() {
            return Err(IngestError::NoDataRows);
        }

        Ok(Self {
            header,
            rows,
            stats,
        })
    }

    /// Header line
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Data rows in source order
    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: a source without data rows is rejected on construction
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get statistics
    pub fn stats(&self) -> &SourceStats {
        &self.stats
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"').trim().to_string())
        .collect()
}
