//! Resolution of the file or directory being sandboxed

use std::path::{Path, PathBuf};

use safer_fs::is_network_path;

use crate::{Error, Result};

/// The user's file or directory, resolved to an absolute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    path: PathBuf,
    is_dir: bool,
    original_base: PathBuf,
}

impl SyncTarget {
    /// Resolve `path` to an absolute, canonical target.
    ///
    /// # Errors
    ///
    /// Fails if the path does not exist, is on a network share, or is
    /// neither a regular file nor a directory.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if is_network_path(path) {
            return Err(Error::NetworkTarget {
                path: path.to_path_buf(),
            });
        }

        let abs = dunce::canonicalize(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::TargetNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        let metadata = std::fs::metadata(&abs)?;

        let (is_dir, original_base) = if metadata.is_dir() {
            (true, abs.clone())
        } else if metadata.is_file() {
            let parent = abs
                .parent()
                .ok_or_else(|| Error::UnsupportedTarget { path: abs.clone() })?
                .to_path_buf();
            (false, parent)
        } else {
            return Err(Error::UnsupportedTarget { path: abs });
        };

        Ok(Self {
            path: abs,
            is_dir,
            original_base,
        })
    }

    /// Absolute path of the target itself.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Directory the workspace root maps onto: the target itself for a
    /// directory, its parent for a file.
    pub fn original_base(&self) -> &Path {
        &self.original_base
    }
}
