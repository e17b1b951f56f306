//! CSV output formatter for grouped scan records.
//!
//! One row is generated for each (inode, path) pair of every reported group.
//!
//! # Columns
//!
//! - `group_id`: 1-based number of the group within this report
//! - `hostname`, `device_id`, `content_hash`: the group key
//! - `size_bytes`: file size recorded for the group
//! - `inode`, `link_count`, `path`: the file itself

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::{GroupKey, HashGroup};

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl From<CsvOutputError> for super::ReportError {
    fn from(err: CsvOutputError) -> Self {
        match err {
            CsvOutputError::Io(e) => Self::Io(e),
            CsvOutputError::Csv(e) => Self::Csv(e),
        }
    }
}

/// Column names, in row order.
const HEADERS: [&str; 8] = [
    "group_id",
    "hostname",
    "device_id",
    "content_hash",
    "size_bytes",
    "inode",
    "link_count",
    "path",
];

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    hostname: &'a str,
    device_id: &'a str,
    content_hash: &'a str,
    size_bytes: u64,
    inode: &'a str,
    link_count: u64,
    path: &'a str,
}

/// CSV output formatter.
pub struct CsvReport<'a> {
    groups: &'a [(&'a GroupKey, &'a HashGroup)],
}

impl<'a> CsvReport<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(groups: &'a [(&'a GroupKey, &'a HashGroup)]) -> Self {
        Self { groups }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // serde only emits the header with the first row
        if self.groups.is_empty() {
            csv_writer.write_record(HEADERS)?;
        }

        for (idx, (key, group)) in self.groups.iter().enumerate() {
            for entry in group.entries() {
                csv_writer.serialize(CsvRow {
                    group_id: idx + 1,
                    hostname: &key.hostname,
                    device_id: &key.device_id,
                    content_hash: &key.content_hash,
                    size_bytes: group.size_bytes,
                    inode: entry.inode,
                    link_count: entry.link_count,
                    path: entry.path,
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
