//! Content-hash groups.
//!
//! # Overview
//!
//! A [`HashGroup`] holds every inode seen with one content hash inside one
//! `(hostname, device_id)` scope. Paths hang off their inode, so hard links
//! show up as several paths under a single inode rather than as extra inodes.
//!
//! A group is a true duplicate set only when it has two or more distinct
//! inodes:
//!
//! ```
//! use dupgroup::duplicates::HashGroup;
//!
//! let mut group = HashGroup::new(4096);
//! group.add_path("100", "/x/a", 2);
//! group.add_path("100", "/x/b", 2); // hard link to the same inode
//! assert!(!group.is_duplicate());
//!
//! group.add_path("200", "/y/c", 1);
//! assert!(group.is_duplicate());
//! assert_eq!(group.inode_count(), 2);
//! assert_eq!(group.path_count(), 3);
//! ```

use std::collections::BTreeMap;

/// Key of one content-hash group.
///
/// Inode numbers are only unique within one device on one host, so the hash
/// is always scoped by both.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Host the files were scanned on
    pub hostname: String,
    /// Filesystem device number
    pub device_id: String,
    /// Content digest shared by every file in the group
    pub content_hash: String,
}

impl GroupKey {
    /// Create a new group key.
    #[must_use]
    pub fn new(
        hostname: impl Into<String>,
        device_id: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            device_id: device_id.into(),
            content_hash: content_hash.into(),
        }
    }
}

/// Paths referencing one inode, each with the link count last reported for it.
pub type InodePaths = BTreeMap<String, u64>;

/// All inodes sharing one content hash on one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashGroup {
    /// File size in bytes, taken from the most recent record for this hash
    pub size_bytes: u64,
    /// Inode -> paths
    inodes: BTreeMap<String, InodePaths>,
}

/// One printable row of a group: an (inode, path) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupEntry<'a> {
    /// Inode number
    pub inode: &'a str,
    /// Path referencing the inode
    pub path: &'a str,
    /// Link count reported with this path
    pub link_count: u64,
}

impl HashGroup {
    /// Create an empty group for files of the given size.
    #[must_use]
    pub fn new(size_bytes: u64) -> Self {
        Self {
            size_bytes,
            inodes: BTreeMap::new(),
        }
    }

    /// Attach a path to an inode, creating the inode entry if needed.
    ///
    /// Re-adding an existing path only refreshes its link count.
    pub fn add_path(&mut self, inode: &str, path: &str, link_count: u64) {
        self.inodes
            .entry(inode.to_string())
            .or_default()
            .insert(path.to_string(), link_count);
    }

    /// Detach an inode and all of its paths.
    pub fn take_inode(&mut self, inode: &str) -> Option<InodePaths> {
        self.inodes.remove(inode)
    }

    /// Attach an inode with a full set of paths, merging into any existing entry.
    pub fn put_inode(&mut self, inode: &str, paths: InodePaths) {
        self.inodes.entry(inode.to_string()).or_default().extend(paths);
    }

    /// Number of distinct inodes (physical files) in this group.
    #[must_use]
    pub fn inode_count(&self) -> usize {
        self.inodes.len()
    }

    /// Number of distinct paths across all inodes.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.inodes.values().map(BTreeMap::len).sum()
    }

    /// Check if this group holds no inodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inodes.is_empty()
    }

    /// Check if this group is a true duplicate set (2+ distinct inodes).
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.inodes.len() >= 2
    }

    /// Bytes that would be freed by keeping a single inode.
    #[must_use]
    pub fn reclaimable_bytes(&self) -> u64 {
        self.size_bytes
            .saturating_mul(self.inodes.len().saturating_sub(1) as u64)
    }

    /// Check whether an inode is part of this group.
    #[must_use]
    pub fn contains_inode(&self, inode: &str) -> bool {
        self.inodes.contains_key(inode)
    }

    /// Iterate inodes with their paths, ordered by inode.
    pub fn inodes(&self) -> impl Iterator<Item = (&str, &InodePaths)> {
        self.inodes.iter().map(|(inode, paths)| (inode.as_str(), paths))
    }

    /// Iterate every (inode, path) pair, ordered by inode then path.
    pub fn entries(&self) -> impl Iterator<Item = GroupEntry<'_>> {
        self.inodes.iter().flat_map(|(inode, paths)| {
            paths.iter().map(move |(path, &link_count)| GroupEntry {
                inode: inode.as_str(),
                path: path.as_str(),
                link_count,
            })
        })
    }
}
