//! Duplicate detection module.
//!
//! This module provides:
//! - [`GroupingIndex`]: records grouped by host, device, content hash and inode
//! - [`HashGroup`]: one content-hash group with hard-link aware inode counting

pub mod groups;
pub mod index;

pub use groups::{GroupEntry, GroupKey, HashGroup, InodePaths};
pub use index::{GroupingIndex, IndexStats, InsertOutcome};
