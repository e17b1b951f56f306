//! Device, inode and link count for scanned files.
//!
//! # Platform Support
//!
//! - **Unix**: read from `st_dev`, `st_ino` and `st_nlink`
//! - **Other**: not available; the walker numbers files itself so that
//!   every path counts as a separate physical file

use std::fs::Metadata;

/// Physical identity of a file on its filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InodeInfo {
    /// Filesystem device number
    pub device_id: u64,
    /// Inode number on that device
    pub inode: u64,
    /// Number of hard links
    pub link_count: u64,
}

impl InodeInfo {
    /// Read identity from file metadata.
    ///
    /// Returns `None` if the platform doesn't expose inode numbers.
    #[cfg(unix)]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            device_id: metadata.dev(),
            inode: metadata.ino(),
            link_count: metadata.nlink(),
        })
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }

    /// Stand-in identity for platforms without inode numbers.
    #[must_use]
    pub fn synthetic(ordinal: u64) -> Self {
        Self {
            device_id: 0,
            inode: ordinal,
            link_count: 1,
        }
    }

    /// Check if inode identity is available on this platform.
    #[must_use]
    pub const fn is_supported() -> bool {
        cfg!(unix)
    }
}
