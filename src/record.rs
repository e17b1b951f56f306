//! Scan record codec.
//!
//! A record is one observation of a regular file, written by the scanner as
//! seven fields joined by a single-character separator:
//!
//! ```text
//! hostname SEP content_hash SEP device_id SEP inode SEP link_count SEP size_bytes SEP path
//! ```
//!
//! The separator defaults to the ASCII NUL character, which cannot appear in
//! a Unix path. A line consisting of exactly `None` is a placeholder written
//! by older producers for files that vanished mid-scan and carries no data.
//!
//! # Example
//!
//! ```
//! use dupgroup::record::Record;
//!
//! let line = "h1\0d41d8cd98f00b204e9800998ecf8427e\x0066306\x00131\x001\x000\x00/tmp/empty";
//! let record = Record::parse(line, '\0').unwrap().unwrap();
//! assert_eq!(record.inode, "131");
//! assert_eq!(record.size_bytes, 0);
//!
//! assert!(Record::parse("None", '\0').unwrap().is_none());
//! ```

use serde::Serialize;
use thiserror::Error;

/// Number of fields in every well-formed record line.
pub const FIELD_COUNT: usize = 7;

/// Literal line written in place of a record that has no data.
pub const PLACEHOLDER: &str = "None";

/// Default field separator (ASCII NUL).
pub const DEFAULT_SEPARATOR: char = '\0';

/// One regular file as observed by a scan.
///
/// `device_id` and `inode` are kept as opaque strings: they are only ever
/// used as grouping keys and printed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Host the scan ran on
    pub hostname: String,
    /// Hex digest of the full file content
    pub content_hash: String,
    /// Filesystem device number
    pub device_id: String,
    /// Inode number on that device
    pub inode: String,
    /// Number of hard links to the inode
    pub link_count: u64,
    /// File size in bytes
    pub size_bytes: u64,
    /// Path the file was found at
    pub path: String,
}

/// Reasons a record line cannot be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line did not split into exactly [`FIELD_COUNT`] fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Required field count
        expected: usize,
        /// Fields actually present
        found: usize,
    },

    /// A numeric field did not hold an unsigned integer.
    #[error("field '{field}' is not an integer: '{value}'")]
    InvalidNumber {
        /// Name of the offending field
        field: &'static str,
        /// Raw field text
        value: String,
    },
}

impl Record {
    /// Decode one line.
    ///
    /// A single trailing `\n` is removed before splitting. Returns `Ok(None)`
    /// for the placeholder line.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the field count is wrong or when
    /// `link_count` / `size_bytes` are not integers.
    pub fn parse(line: &str, separator: char) -> Result<Option<Self>, RecordError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        if line == PLACEHOLDER {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(separator).collect();
        let [hostname, content_hash, device_id, inode, link_count, size_bytes, path] =
            fields.as_slice()
        else {
            return Err(RecordError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        };

        Ok(Some(Self {
            hostname: (*hostname).to_string(),
            content_hash: (*content_hash).to_string(),
            device_id: (*device_id).to_string(),
            inode: (*inode).to_string(),
            link_count: parse_number("link_count", link_count)?,
            size_bytes: parse_number("size_bytes", size_bytes)?,
            path: (*path).to_string(),
        }))
    }

    /// Encode this record as a line body (no trailing newline).
    #[must_use]
    pub fn encode(&self, separator: char) -> String {
        let link_count = self.link_count.to_string();
        let size_bytes = self.size_bytes.to_string();
        let mut buf = [0u8; 4];
        let separator: &str = separator.encode_utf8(&mut buf);
        [
            self.hostname.as_str(),
            self.content_hash.as_str(),
            self.device_id.as_str(),
            self.inode.as_str(),
            link_count.as_str(),
            size_bytes.as_str(),
            self.path.as_str(),
        ]
        .join(separator)
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<u64, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Render a separator for diagnostics.
///
/// Printable ASCII is shown as itself; anything else as `ord(N)`.
#[must_use]
pub fn printable_separator(separator: char) -> String {
    if separator.is_ascii_graphic() || separator == ' ' {
        separator.to_string()
    } else {
        format!("ord({})", u32::from(separator))
    }
}
