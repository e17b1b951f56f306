//! Report generation for grouped scan records.
//!
//! This module decides which groups are reported and renders them:
//! - [`text`]: fixed-width columns, one line per (inode, path)
//! - [`json`]: machine-readable JSON for scripting
//! - [`csv`]: one CSV row per (inode, path) for spreadsheets
//!
//! # Example
//!
//! ```
//! use dupgroup::cli::OutputFormat;
//! use dupgroup::duplicates::GroupingIndex;
//! use dupgroup::output::{write_report, ReportOptions};
//!
//! let index = GroupingIndex::new();
//! let mut out = Vec::new();
//! let emitted = write_report(&index, &ReportOptions::default(), OutputFormat::Text, &mut out).unwrap();
//! assert_eq!(emitted, 0);
//! assert!(out.is_empty());
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::io;

use thiserror::Error;

use crate::cli::OutputFormat;
use crate::duplicates::{GroupKey, GroupingIndex, HashGroup};

pub use self::csv::CsvReport;
pub use self::json::JsonReport;
pub use self::text::TextReport;

/// Which groups to report and how to lay them out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Smallest group size (bytes, inclusive) to report
    pub min_size: u64,
    /// Report every group, not only duplicates
    pub list_all: bool,
    /// Omit the blank line before each duplicate group
    pub suppress_separators: bool,
}

impl ReportOptions {
    /// Whether a group passes the duplicate and size filters.
    #[must_use]
    pub fn selects(&self, group: &HashGroup) -> bool {
        (self.list_all || group.is_duplicate()) && group.size_bytes >= self.min_size
    }

    /// Whether a blank line is written before each group.
    ///
    /// Only duplicate reports are separated; list-all output is one
    /// continuous listing.
    #[must_use]
    pub fn separates_groups(&self) -> bool {
        !self.list_all && !self.suppress_separators
    }
}

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// I/O error during writing.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Error during JSON serialization.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Error during CSV serialization.
    #[error(transparent)]
    Csv(#[from] ::csv::Error),
}

impl ReportError {
    /// Check if the reader of the output went away (e.g. `| head`).
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        let kind = match self {
            Self::Io(e) => Some(e.kind()),
            Self::Json(e) => e.io_error_kind(),
            Self::Csv(e) => match e.kind() {
                ::csv::ErrorKind::Io(e) => Some(e.kind()),
                _ => None,
            },
        };
        kind == Some(io::ErrorKind::BrokenPipe)
    }
}

/// Groups chosen for the report, in index order.
#[must_use]
pub fn select_groups<'a>(
    index: &'a GroupingIndex,
    options: &ReportOptions,
) -> Vec<(&'a GroupKey, &'a HashGroup)> {
    index
        .iter()
        .filter(|(_, group)| options.selects(group))
        .collect()
}

/// Write a report in the requested format.
///
/// Returns the number of groups emitted.
///
/// # Errors
///
/// Returns [`ReportError`] if writing or serialization fails.
pub fn write_report<W: io::Write>(
    index: &GroupingIndex,
    options: &ReportOptions,
    format: OutputFormat,
    writer: W,
) -> Result<usize, ReportError> {
    let groups = select_groups(index, options);
    let emitted = groups.len();

    match format {
        OutputFormat::Text => TextReport::new(&groups, options).write_to(writer)?,
        OutputFormat::Json => JsonReport::new(&groups, index.stats()).write_to(writer)?,
        OutputFormat::Csv => CsvReport::new(&groups).write_to(writer)?,
    }

    log::debug!("{emitted} group(s) written as {format}");
    Ok(emitted)
}
