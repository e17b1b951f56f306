//! Scanner: directory traversal and record emission.
//!
//! The scanner walks a tree and writes one [`Record`] per regular file to an
//! output stream. It is the producer side of the pipeline; the report stage
//! consumes its output, possibly concatenated from several hosts.
//!
//! # Architecture
//!
//! - [`walker`]: regular-file discovery (symlinks never followed)
//! - [`hasher`]: 128-bit BLAKE3 content digest, tolerant of read failures
//! - [`inode`]: device, inode and link count from file metadata
//!
//! # Example
//!
//! ```no_run
//! use dupgroup::scanner::{hostname, scan_tree};
//! use std::path::Path;
//!
//! let summary = scan_tree(Path::new("."), '\0', &hostname(), std::io::stdout().lock()).unwrap();
//! eprintln!("{} files", summary.files);
//! ```

pub mod hasher;
pub mod inode;
pub mod walker;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::record::Record;

// Re-export main types
pub use hasher::{hash_to_hex, Digest, Hasher, DIGEST_LEN};
pub use inode::InodeInfo;
pub use walker::Walker;

/// Hostname written when the system does not report one.
pub const UNKNOWN_HOST: &str = "[UNKNOWN]";

/// Metadata for a discovered file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path to the file, joined onto the walk root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Device, inode and link count
    pub identity: InodeInfo,
}

impl FileEntry {
    /// Build the scan record for this file.
    #[must_use]
    pub fn to_record(&self, hostname: &str, digest: &Digest) -> Record {
        Record {
            hostname: hostname.to_string(),
            content_hash: hash_to_hex(digest),
            device_id: self.identity.device_id.to_string(),
            inode: self.identity.inode.to_string(),
            link_count: self.identity.link_count,
            size_bytes: self.size,
            path: self.path.to_string_lossy().into_owned(),
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The record stream could not be written.
    #[error("cannot write scan output")]
    Output(#[source] io::Error),
}

impl ScanError {
    fn from_walkdir(path: &Path, err: walkdir::Error) -> Self {
        match err.into_io_error() {
            Some(e) => match e.kind() {
                io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
                io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
                _ => Self::Io {
                    path: path.to_path_buf(),
                    source: e,
                },
            },
            None => Self::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "filesystem loop detected"),
            },
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Counters from one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records written
    pub files: usize,
    /// Sum of file sizes
    pub total_size: u64,
    /// Entries the walk could not visit
    pub walk_errors: usize,
    /// Files written with a partial or empty digest
    pub read_errors: usize,
}

/// Render an error followed by its causes, separated by `: `.
fn describe(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        text.push_str(": ");
        text.push_str(&e.to_string());
        cause = e.source();
    }
    text
}

/// Name of this host, or [`UNKNOWN_HOST`].
#[must_use]
pub fn hostname() -> String {
    sysinfo::System::host_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

/// Strip trailing slashes from a start directory, keeping a bare root.
#[must_use]
pub fn normalize_root(root: &Path) -> PathBuf {
    let text = root.to_string_lossy();
    let trimmed = text.trim_end_matches('/');
    if trimmed.is_empty() {
        root.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

/// Scan `root` and write one record line per regular file to `writer`.
///
/// Walk and read failures are logged and counted; a file that cannot be
/// read is still written with the digest of whatever was read.
///
/// # Errors
///
/// Returns [`ScanError::NotFound`] / [`ScanError::NotADirectory`] for a bad
/// root, and [`ScanError::Output`] if writing fails.
pub fn scan_tree<W: Write>(
    root: &Path,
    separator: char,
    hostname: &str,
    writer: W,
) -> Result<ScanSummary, ScanError> {
    let root = normalize_root(root);
    match std::fs::metadata(&root) {
        Ok(m) if m.is_dir() => {}
        Ok(_) => return Err(ScanError::NotADirectory(root)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ScanError::NotFound(root)),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(ScanError::PermissionDenied(root))
        }
        Err(e) => return Err(ScanError::Io { path: root, source: e }),
    }

    let mut out = io::BufWriter::new(writer);
    let hasher = Hasher::new();
    let mut summary = ScanSummary::default();

    log::debug!("Scanning {} as host {}", root.display(), hostname);
    for entry in Walker::new(&root).walk() {
        let file = match entry {
            Ok(file) => file,
            Err(e) => {
                log::warn!("{}", describe(&e));
                summary.walk_errors += 1;
                continue;
            }
        };

        let outcome = hasher.hash_file(&file.path);
        if let Some(e) = &outcome.error {
            log::warn!("could not read file: {}", describe(e));
            summary.read_errors += 1;
        }

        let record = file.to_record(hostname, &outcome.digest);
        writeln!(out, "{}", record.encode(separator)).map_err(ScanError::Output)?;
        summary.files += 1;
        summary.total_size += file.size;
    }
    out.flush().map_err(ScanError::Output)?;

    Ok(summary)
}
