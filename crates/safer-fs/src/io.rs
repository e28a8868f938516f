//! Copy and write helpers
//!
//! Workspace copies are plain byte-exact copies. Writes into the user's
//! original location go through a sibling temp file and a rename, so a
//! failure part way through never leaves a truncated file in place.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::checksum::{ContentDigest, hash_chunks};
use crate::{Error, Result};

/// Mode used for every directory created by this crate.
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Create `path` and any missing parents with 0755 permissions.
pub fn create_dir_all(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path).map_err(|e| Error::io(path, e))
}

/// Copy `src` to `dst` and return the checksum of the bytes copied.
///
/// The source is read once; every chunk is hashed and written in the same
/// pass, so the digest always describes exactly what landed in `dst`, even
/// if `src` changes concurrently. Permission bits follow `src`.
pub fn copy_with_checksum(src: &Path, dst: &Path) -> Result<ContentDigest> {
    let mut input = File::open(src).map_err(|e| Error::io(src, e))?;
    let permissions = input
        .metadata()
        .map_err(|e| Error::io(src, e))?
        .permissions();
    let mut output = File::create(dst).map_err(|e| Error::io(dst, e))?;

    let digest = hash_chunks(
        &mut input,
        |e| Error::io(src, e),
        |chunk| output.write_all(chunk).map_err(|e| Error::io(dst, e)),
    )?;
    output.flush().map_err(|e| Error::io(dst, e))?;
    drop(output);

    fs::set_permissions(dst, permissions).map_err(|e| Error::io(dst, e))?;
    Ok(digest)
}

/// Replace `dst` with a copy of `src`.
///
/// Missing parent directories are created first. The bytes land in a temp
/// file next to `dst` which is then renamed over it, so readers see either
/// the old or the new content and never a partial write. Permission bits
/// follow `src`.
///
/// The rename gives `dst` a new inode. Hard links to the old file keep the
/// old content, and owner and group become those of the current process.
pub fn replace_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        create_dir_all(parent)?;
    }

    let temp_path = temp_sibling(dst);
    if let Err(e) = fs::copy(src, &temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(src, e));
    }

    if let Err(e) = fs::rename(&temp_path, dst) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(dst, e));
    }

    tracing::trace!(src = %src.display(), dst = %dst.display(), "replaced file");
    Ok(())
}

/// Write `content` to `path` through a locked sibling temp file and a rename.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let temp_path = temp_sibling(path);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(path, e));
    }

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Temp file path in the same directory (same filesystem, so rename is atomic).
fn temp_sibling(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}
