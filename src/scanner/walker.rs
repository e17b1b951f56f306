//! Directory walker using walkdir.
//!
//! # Overview
//!
//! The [`Walker`] yields one [`FileEntry`] per regular file under a root.
//! Symbolic links are never followed and never reported; devices, pipes,
//! sockets and directories are skipped. Children are visited in file-name
//! order so repeated scans of an unchanged tree produce identical output.
//!
//! # Example
//!
//! ```no_run
//! use dupgroup::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/srv/data"));
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::inode::InodeInfo;
use super::{FileEntry, ScanError};

/// Directory walker for regular-file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            root: path.to_path_buf(),
        }
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let mut ordinal = 0u64;

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    // With follow_links(false) this is the lstat type, so
                    // symlinks never look like regular files here
                    if !entry.file_type().is_file() {
                        if entry.file_type().is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        return None;
                    }

                    let metadata = match entry.metadata() {
                        Ok(m) => m,
                        Err(e) => return Some(Err(ScanError::from_walkdir(entry.path(), e))),
                    };

                    ordinal += 1;
                    let identity = InodeInfo::from_metadata(&metadata)
                        .unwrap_or_else(|| InodeInfo::synthetic(ordinal));

                    Some(Ok(FileEntry {
                        path: entry.into_path(),
                        size: metadata.len(),
                        identity,
                    }))
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    Some(Err(ScanError::from_walkdir(&path, e)))
                }
            })
    }
}
