//! SHA-256 content checksums
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used for the
//! snapshot manifest and every comparison made during reconciliation.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Read buffer size used when streaming a file through the hasher.
pub(crate) const CHUNK_SIZE: usize = 64 * 1024;

/// Fingerprint of a file's bytes.
///
/// Two equal digests are treated as equal content; collisions are not a
/// modeled failure mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub(crate) fn from_hasher(hasher: Sha256) -> Self {
        Self(format!("{}{:x}", PREFIX, hasher.finalize()))
    }

    /// The canonical `sha256:<hex>` representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hex part without the algorithm prefix.
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the SHA-256 checksum of in-memory content.
pub fn compute_content_checksum(content: impl AsRef<[u8]>) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(content.as_ref());
    ContentDigest::from_hasher(hasher)
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// The file is streamed in fixed-size chunks, so memory use does not grow
/// with file size.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read. A failed read is
/// never reported as empty content.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<ContentDigest> {
    let mut file = File::open(path)?;
    hash_chunks(&mut file, |e| e, |_| Ok(()))
}

/// Stream `reader` through SHA-256 in [`CHUNK_SIZE`] reads.
///
/// Each chunk is handed to `on_chunk` after it is hashed, which lets a copy
/// write exactly the bytes that were hashed. Read failures are mapped with
/// `on_read_error`; interrupted reads are retried.
pub(crate) fn hash_chunks<R, E>(
    reader: &mut R,
    on_read_error: impl Fn(std::io::Error) -> E,
    mut on_chunk: impl FnMut(&[u8]) -> Result<(), E>,
) -> Result<ContentDigest, E>
where
    R: Read + ?Sized,
{
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(on_read_error(e)),
        };
        hasher.update(&buf[..n]);
        on_chunk(&buf[..n])?;
    }

    Ok(ContentDigest::from_hasher(hasher))
}
