//! JSON output formatter for grouped scan records.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "groups": [
//!     {
//!       "hostname": "h1",
//!       "device_id": "2049",
//!       "content_hash": "0cc175b9c0f1b6a831c399e269772661",
//!       "size_bytes": 4096,
//!       "inode_count": 2,
//!       "files": [
//!         { "inode": "100", "path": "/x/a", "link_count": 2 },
//!         { "inode": "200", "path": "/y/c", "link_count": 1 }
//!       ]
//!     }
//!   ],
//!   "summary": {
//!     "emitted_groups": 1,
//!     "records": 3,
//!     "rebinds": 0,
//!     "groups": 1,
//!     "duplicate_groups": 1,
//!     "redundant_inodes": 1,
//!     "reclaimable_bytes": 4096
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{GroupKey, HashGroup, IndexStats};

/// One (inode, path) pair in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFile {
    /// Inode number
    pub inode: String,
    /// Path referencing the inode
    pub path: String,
    /// Link count reported with this path
    pub link_count: u64,
}

/// A single reported group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// Host the files were scanned on
    pub hostname: String,
    /// Filesystem device number
    pub device_id: String,
    /// Content digest
    pub content_hash: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Distinct inodes in the group
    pub inode_count: usize,
    /// Every (inode, path) pair
    pub files: Vec<JsonFile>,
}

impl JsonGroup {
    /// Build from an index group.
    #[must_use]
    pub fn from_group(key: &GroupKey, group: &HashGroup) -> Self {
        Self {
            hostname: key.hostname.clone(),
            device_id: key.device_id.clone(),
            content_hash: key.content_hash.clone(),
            size_bytes: group.size_bytes,
            inode_count: group.inode_count(),
            files: group
                .entries()
                .map(|e| JsonFile {
                    inode: e.inode.to_string(),
                    path: e.path.to_string(),
                    link_count: e.link_count,
                })
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Groups present in this report
    pub emitted_groups: usize,
    /// Statistics over the whole index
    #[serde(flatten)]
    pub stats: IndexStats,
}

/// JSON output formatter.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Reported groups
    pub groups: Vec<JsonGroup>,
    /// Summary statistics
    pub summary: JsonSummary,
}

impl JsonReport {
    /// Create a new JSON report from selected groups and index statistics.
    #[must_use]
    pub fn new(groups: &[(&GroupKey, &HashGroup)], stats: IndexStats) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|(key, group)| JsonGroup::from_group(key, group))
                .collect(),
            summary: JsonSummary {
                emitted_groups: groups.len(),
                stats,
            },
        }
    }

    /// Compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer).map_err(serde_json::Error::io)?;
        writer.flush().map_err(serde_json::Error::io)
    }
}
