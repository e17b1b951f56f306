//! Column-aligned text report.
//!
//! One line per (inode, path) pair of every reported group:
//!
//! ```text
//! <hostname>  <content_hash>  <size, width 10>  <inode, width 10>  <path>
//! ```
//!
//! Size and inode are right-justified to at least ten characters. In
//! duplicate reports each group is preceded by a blank line unless
//! separators are suppressed.

use std::io::{self, Write};

use super::ReportOptions;
use crate::duplicates::{GroupKey, HashGroup};

/// Text output formatter.
pub struct TextReport<'a> {
    groups: &'a [(&'a GroupKey, &'a HashGroup)],
    separate: bool,
}

impl<'a> TextReport<'a> {
    /// Create a new text formatter for already-selected groups.
    #[must_use]
    pub fn new(groups: &'a [(&'a GroupKey, &'a HashGroup)], options: &ReportOptions) -> Self {
        Self {
            groups,
            separate: options.separates_groups(),
        }
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut out = io::BufWriter::new(writer);
        for (key, group) in self.groups {
            if self.separate {
                writeln!(out)?;
            }
            for entry in group.entries() {
                writeln!(
                    out,
                    "{}  {}  {:>10}  {:>10}  {}",
                    key.hostname, key.content_hash, group.size_bytes, entry.inode, entry.path
                )?;
            }
        }
        out.flush()
    }

    /// Render the report as a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
