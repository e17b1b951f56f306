//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! Records carry a 128-bit content digest written as 32 lowercase hex
//! characters. The digest is the first 16 bytes of BLAKE3's extendable
//! output over the full file content.
//!
//! Hashing is fault tolerant per file: when a read fails part way through,
//! the digest of the bytes read so far is returned together with the error,
//! so the file is still represented in the scan output.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::HashError;

/// Digest length in bytes (128 bits).
pub const DIGEST_LEN: usize = 16;

/// Content digest of one file.
pub type Digest = [u8; DIGEST_LEN];

/// Default read buffer size.
const BUFFER_SIZE: usize = 64 * 1024;

/// Outcome of hashing one file.
#[derive(Debug)]
pub struct HashOutcome {
    /// Digest of every byte that could be read
    pub digest: Digest,
    /// Set when the file could not be read to the end
    pub error: Option<HashError>,
}

/// Streaming file hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Use a custom read buffer size (minimum 1 byte).
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Hash a file, keeping the partial digest on read failure.
    ///
    /// A file that cannot be opened yields the digest of empty input.
    #[must_use]
    pub fn hash_file(&self, path: &Path) -> HashOutcome {
        match File::open(path) {
            Ok(file) => {
                let (digest, error) = self.hash_reader(file);
                HashOutcome {
                    digest,
                    error: error.map(|e| HashError::from_io(path, e)),
                }
            }
            Err(e) => HashOutcome {
                digest: self.hash_reader(io::empty()).0,
                error: Some(HashError::from_io(path, e)),
            },
        }
    }

    /// Hash a file, failing on any read error.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or fully read.
    pub fn full_hash(&self, path: &Path) -> Result<Digest, HashError> {
        let outcome = self.hash_file(path);
        match outcome.error {
            Some(e) => Err(e),
            None => Ok(outcome.digest),
        }
    }

    /// Hash everything `reader` yields until EOF or the first error.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> (Digest, Option<io::Error>) {
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.buffer_size];
        let mut error = None;

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&buffer[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }

        let mut digest = [0u8; DIGEST_LEN];
        hasher.finalize_xof().fill(&mut digest);
        (digest, error)
    }
}

/// Convert a digest to lowercase hexadecimal.
#[must_use]
pub fn hash_to_hex(digest: &Digest) -> String {
    use std::fmt::Write;
    digest.iter().fold(String::with_capacity(DIGEST_LEN * 2), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}
