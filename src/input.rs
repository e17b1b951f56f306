//! Reading scan records from files and standard input.
//!
//! Each source is drained completely and closed before the next one is
//! opened. Malformed lines are skipped with a warning; a source that cannot
//! be opened aborts the run.
//!
//! # Example
//!
//! ```
//! use dupgroup::duplicates::GroupingIndex;
//! use dupgroup::input::{read_records, ParseSummary};
//!
//! let data = "h\0abc\x001\x0010\x001\x005\x00/a\nNone\nbroken line\n";
//! let mut index = GroupingIndex::new();
//! let mut summary = ParseSummary::default();
//!
//! read_records(data.as_bytes(), "example", '\0', &mut index, &mut summary).unwrap();
//!
//! assert_eq!(summary.records, 1);
//! assert_eq!(summary.placeholders, 1);
//! assert_eq!(summary.skipped.len(), 1);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use thiserror::Error;

use crate::duplicates::GroupingIndex;
use crate::logging::SKIPPED_LINE_TARGET;
use crate::record::{printable_separator, Record, RecordError};

/// Name accepted on the command line for standard input.
pub const STDIN_SYMBOL: &str = "__stdin__";

/// Where records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A named file
    File(PathBuf),
}

impl InputSource {
    /// Interpret a command-line name. `-` and `__stdin__` mean standard input.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" || arg == STDIN_SYMBOL {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "standard input"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fatal input errors.
#[derive(Debug, Error)]
pub enum InputError {
    /// A source file could not be opened.
    #[error("cannot open {path}")]
    Open {
        /// File that failed to open
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Reading from an open source failed.
    #[error("read error in {source_name} after line {line}")]
    Read {
        /// Source being read
        source_name: String,
        /// Last line read successfully
        line: usize,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// A line that was skipped because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// Source the line came from
    pub source: String,
    /// 1-based line number
    pub line_number: usize,
    /// Line content without the trailing newline
    pub content: String,
    /// Why it was rejected
    pub error: RecordError,
}

/// Counters collected while reading sources.
#[derive(Debug, Clone, Default)]
pub struct ParseSummary {
    /// Sources fully read
    pub sources: usize,
    /// Lines read
    pub lines: usize,
    /// Records added to the index
    pub records: usize,
    /// Placeholder lines ignored
    pub placeholders: usize,
    /// Lines rejected as malformed
    pub skipped: Vec<SkippedLine>,
}

/// Read every record from `reader` into `index`.
///
/// `source_name` is used in diagnostics only.
///
/// # Errors
///
/// Returns [`InputError::Read`] if the underlying reader fails. Malformed
/// lines are not errors; they are logged and collected in `summary.skipped`.
pub fn read_records<R: BufRead>(
    mut reader: R,
    source_name: &str,
    separator: char,
    index: &mut GroupingIndex,
    summary: &mut ParseSummary,
) -> Result<(), InputError> {
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| InputError::Read {
                source_name: source_name.to_string(),
                line: line_number,
                source,
            })?;
        if read == 0 {
            break;
        }
        line_number += 1;
        summary.lines += 1;

        let line = String::from_utf8_lossy(&buf);
        match Record::parse(&line, separator) {
            Ok(Some(record)) => {
                index.insert(&record);
                summary.records += 1;
            }
            Ok(None) => summary.placeholders += 1,
            Err(error) => {
                let content = line.strip_suffix('\n').unwrap_or(&line).to_string();
                log::warn!(
                    target: SKIPPED_LINE_TARGET,
                    "skipping line; field_separator => '{}'; cannot parse: {} line {}: {}: {}",
                    printable_separator(separator),
                    source_name,
                    line_number,
                    error,
                    content
                );
                summary.skipped.push(SkippedLine {
                    source: source_name.to_string(),
                    line_number,
                    content,
                    error,
                });
            }
        }
    }

    summary.sources += 1;
    log::debug!("{source_name}: {line_number} line(s) read");
    Ok(())
}

/// Open one source and read it into `index`.
///
/// The source is closed before this function returns.
///
/// # Errors
///
/// Returns [`InputError::Open`] if a file cannot be opened, or
/// [`InputError::Read`] on a read failure.
pub fn read_source(
    source: &InputSource,
    separator: char,
    index: &mut GroupingIndex,
    summary: &mut ParseSummary,
) -> Result<(), InputError> {
    let name = source.to_string();
    match source {
        InputSource::Stdin => {
            let stdin = io::stdin();
            read_records(stdin.lock(), &name, separator, index, summary)
        }
        InputSource::File(path) => {
            let file = File::open(path).map_err(|source| InputError::Open {
                path: path.clone(),
                source,
            })?;
            read_records(BufReader::new(file), &name, separator, index, summary)
        }
    }
}

/// Read all sources in order into a fresh index.
///
/// An empty source list reads standard input.
///
/// # Errors
///
/// Stops at the first source that fails to open or read.
pub fn read_sources(
    sources: &[InputSource],
    separator: char,
) -> Result<(GroupingIndex, ParseSummary), InputError> {
    let mut index = GroupingIndex::new();
    let mut summary = ParseSummary::default();

    if sources.is_empty() {
        read_source(&InputSource::Stdin, separator, &mut index, &mut summary)?;
    } else {
        for source in sources {
            read_source(source, separator, &mut index, &mut summary)?;
        }
    }

    Ok((index, summary))
}
