//! Relative keys and path checks
//!
//! Manifest keys and report entries are relative paths joined with forward
//! slashes, so they read the same on every platform. Conversion back to a
//! native path happens only at I/O boundaries via [`join_key`].

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Build the OS-neutral manifest key for `path` relative to `root`.
///
/// Every segment must be valid UTF-8, so a key always maps back to the
/// same native path through [`join_key`].
///
/// # Errors
///
/// [`Error::NonUtf8Path`] when a segment is not valid UTF-8, and
/// [`Error::NotBelowRoot`] when `path` is not under `root`, is `root`
/// itself, or contains `..`.
pub fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let not_below = || Error::NotBelowRoot {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    };
    let rel = path.strip_prefix(root).map_err(|_| not_below())?;
    let mut segments = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(segment) => {
                let segment = segment.to_str().ok_or_else(|| Error::NonUtf8Path {
                    path: path.to_path_buf(),
                })?;
                segments.push(segment);
            }
            Component::CurDir => {}
            _ => return Err(not_below()),
        }
    }
    if segments.is_empty() {
        Err(not_below())
    } else {
        Ok(segments.join("/"))
    }
}

/// Resolve a relative key produced by [`relative_key`] under `base`.
pub fn join_key(base: &Path, key: &str) -> PathBuf {
    key.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

/// Whether `path` names a network location.
///
/// Matches UNC paths in either slash style (`//server/share`,
/// `\\server\share`) and `smb://` or `nfs://` URLs.
pub fn is_network_path(path: &Path) -> bool {
    let text = path.to_string_lossy().replace('\\', "/");
    (text.starts_with("//") && !text.starts_with("///"))
        || text.starts_with("smb://")
        || text.starts_with("nfs://")
}
