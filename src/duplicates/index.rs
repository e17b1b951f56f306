//! Grouping index built from scan records.
//!
//! # Overview
//!
//! The index is a flat ordered map from [`GroupKey`] (hostname, device,
//! content hash) to a [`HashGroup`]. Records from any number of sources are
//! merged into one index; inserting the same record twice has no effect
//! beyond refreshing the stored size and link count.
//!
//! ## Inodes that change hash
//!
//! An inode is one physical file, so within one `(hostname, device_id)` scope
//! it belongs to exactly one hash group. When a later record reports a known
//! inode under a different hash (the file changed between scans), the inode
//! and all of its paths move to the new group. A group left without inodes
//! is dropped. Each move is logged and counted in [`IndexStats::rebinds`].
//!
//! # Example
//!
//! ```
//! use dupgroup::duplicates::{GroupingIndex, GroupKey};
//! use dupgroup::record::Record;
//!
//! let rec = |inode: &str, path: &str| Record {
//!     hostname: "h1".into(),
//!     content_hash: "aaaa".into(),
//!     device_id: "1".into(),
//!     inode: inode.into(),
//!     link_count: 1,
//!     size_bytes: 4096,
//!     path: path.into(),
//! };
//!
//! let mut index = GroupingIndex::new();
//! index.insert(&rec("100", "/x/a"));
//! index.insert(&rec("100", "/x/b"));
//! index.insert(&rec("200", "/y/c"));
//!
//! let group = index.get(&GroupKey::new("h1", "1", "aaaa")).unwrap();
//! assert_eq!(group.inode_count(), 2);
//! assert_eq!(group.path_count(), 3);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use serde::Serialize;

use super::groups::{GroupKey, HashGroup, InodePaths};
use crate::record::Record;

/// (hostname, device_id, inode) identifying one physical file.
type InodeKey = (String, String, String);

/// What an insert did to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// First time this inode was seen in its device scope
    New,
    /// Inode already known under the same hash
    Merged,
    /// Inode was known under another hash and has been moved
    Rebound {
        /// Hash the inode was previously grouped under
        from: String,
    },
}

/// Summary statistics over the whole index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Records inserted (including repeats)
    pub records: usize,
    /// Inodes moved to a new hash group
    pub rebinds: usize,
    /// Number of (hostname, device, hash) groups
    pub groups: usize,
    /// Groups with two or more distinct inodes
    pub duplicate_groups: usize,
    /// Inodes beyond the first in each duplicate group
    pub redundant_inodes: usize,
    /// Bytes held by redundant inodes
    pub reclaimable_bytes: u64,
}

/// In-memory grouping of scan records by host, device, content hash and inode.
#[derive(Debug, Default)]
pub struct GroupingIndex {
    groups: BTreeMap<GroupKey, HashGroup>,
    owners: HashMap<InodeKey, String>,
    records: usize,
    rebinds: usize,
}

impl GroupingIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a sequence of records.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Add one record.
    ///
    /// Creates the group and inode entries as needed, sets the group size to
    /// this record's size and records the path with its link count.
    pub fn insert(&mut self, record: &Record) -> InsertOutcome {
        self.records += 1;

        let owner = (
            record.hostname.clone(),
            record.device_id.clone(),
            record.inode.clone(),
        );

        let (outcome, moved) = match self.owners.get(&owner).cloned() {
            None => (InsertOutcome::New, None),
            Some(hash) if hash == record.content_hash => (InsertOutcome::Merged, None),
            Some(from) => {
                let moved = self.detach(&record.hostname, &record.device_id, &from, &record.inode);
                log::warn!(
                    "inode {} on {}:{} changed hash {} -> {}; regrouping {}",
                    record.inode,
                    record.hostname,
                    record.device_id,
                    from,
                    record.content_hash,
                    record.path
                );
                self.rebinds += 1;
                (InsertOutcome::Rebound { from }, moved)
            }
        };

        let key = GroupKey::new(
            record.hostname.as_str(),
            record.device_id.as_str(),
            record.content_hash.as_str(),
        );
        let group = self
            .groups
            .entry(key)
            .or_insert_with(|| HashGroup::new(record.size_bytes));
        if group.size_bytes != record.size_bytes && !group.is_empty() {
            log::debug!(
                "size for hash {} changed {} -> {} at {}",
                record.content_hash,
                group.size_bytes,
                record.size_bytes,
                record.path
            );
        }
        group.size_bytes = record.size_bytes;
        if let Some(paths) = moved {
            group.put_inode(&record.inode, paths);
        }
        group.add_path(&record.inode, &record.path, record.link_count);

        self.owners.insert(owner, record.content_hash.clone());
        log::trace!("indexed {} ({:?})", record.path, outcome);
        outcome
    }

    fn detach(
        &mut self,
        hostname: &str,
        device_id: &str,
        content_hash: &str,
        inode: &str,
    ) -> Option<InodePaths> {
        let key = GroupKey::new(hostname, device_id, content_hash);
        let group = self.groups.get_mut(&key)?;
        let paths = group.take_inode(inode);
        if group.is_empty() {
            self.groups.remove(&key);
        }
        paths
    }

    /// Look up one group.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&HashGroup> {
        self.groups.get(key)
    }

    /// Iterate groups ordered by hostname, device and hash.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &HashGroup)> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no records have produced any group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Hash the inode is currently grouped under, if known.
    #[must_use]
    pub fn hash_of(&self, hostname: &str, device_id: &str, inode: &str) -> Option<&str> {
        self.owners
            .get(&(hostname.to_string(), device_id.to_string(), inode.to_string()))
            .map(String::as_str)
    }

    /// Compute summary statistics.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            records: self.records,
            rebinds: self.rebinds,
            groups: self.groups.len(),
            ..IndexStats::default()
        };
        for group in self.groups.values().filter(|g| g.is_duplicate()) {
            stats.duplicate_groups += 1;
            stats.redundant_inodes += group.inode_count() - 1;
            stats.reclaimable_bytes += group.reclaimable_bytes();
        }
        stats
    }

    /// Render the whole index as an indented tree for debugging.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut host: Option<&str> = None;
        let mut device: Option<&str> = None;

        for (key, group) in &self.groups {
            if host != Some(key.hostname.as_str()) {
                let _ = writeln!(out, "host => {}", key.hostname);
                host = Some(key.hostname.as_str());
                device = None;
            }
            if device != Some(key.device_id.as_str()) {
                let _ = writeln!(out, "  fsdev => {}", key.device_id);
                device = Some(key.device_id.as_str());
            }
            let _ = writeln!(out, "    hash => {}", key.content_hash);
            let _ = writeln!(out, "      size => {}", group.size_bytes);
            for (inode, paths) in group.inodes() {
                let _ = writeln!(out, "      inode => {inode}");
                for (path, links) in paths {
                    let _ = writeln!(out, "        path => {path} (links: {links})");
                }
            }
        }
        out
    }
}

impl<'a> Extend<&'a Record> for GroupingIndex {
    fn extend<T: IntoIterator<Item = &'a Record>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}
