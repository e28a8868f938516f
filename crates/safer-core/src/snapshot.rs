//! Snapshot copier
//!
//! Copies the target into the workspace and records the baseline manifest.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use safer_fs::{PathFilter, io, relative_key};

use crate::{Error, Manifest, Result};

/// Copy `source` into `workspace_root` and return the baseline manifest.
///
/// A regular file is copied under its base name and produces a single entry.
/// A directory is mirrored recursively; entries rejected by `filter` are not
/// copied, and rejected directories are not descended into. Every digest is
/// computed over the exact bytes read from the source while copying.
///
/// # Errors
///
/// Any I/O failure aborts the snapshot, as does a name that is not valid
/// UTF-8 or a single-file target the filter excludes. The workspace is then
/// in an unspecified partial state and must be discarded by the caller.
pub fn snapshot(source: &Path, workspace_root: &Path, filter: &PathFilter) -> Result<Manifest> {
    let metadata = fs::metadata(source).map_err(|e| Error::snapshot(source, e))?;

    let manifest = if metadata.is_file() {
        snapshot_file(source, workspace_root, filter)?
    } else if metadata.is_dir() {
        snapshot_dir(source, workspace_root, filter)?
    } else {
        return Err(Error::UnsupportedTarget {
            path: source.to_path_buf(),
        });
    };

    info!(
        source = %source.display(),
        workspace = %workspace_root.display(),
        files = manifest.len(),
        "snapshot complete"
    );
    Ok(manifest)
}

fn snapshot_file(source: &Path, workspace_root: &Path, filter: &PathFilter) -> Result<Manifest> {
    let name = source.file_name().ok_or_else(|| Error::UnsupportedTarget {
        path: source.to_path_buf(),
    })?;
    let name = name.to_str().ok_or_else(|| safer_fs::Error::NonUtf8Path {
        path: source.to_path_buf(),
    })?;
    // Reconcile must see the target it reports on.
    if filter.should_skip(name, false, false) {
        return Err(Error::FilteredTarget {
            path: source.to_path_buf(),
        });
    }

    let digest = io::copy_with_checksum(source, &workspace_root.join(name))?;
    debug!(path = %name, %digest, "copied");

    let mut manifest = Manifest::new();
    manifest.insert(name.to_string(), digest);
    Ok(manifest)
}

fn snapshot_dir(source: &Path, workspace_root: &Path, filter: &PathFilter) -> Result<Manifest> {
    let mut manifest = Manifest::new();

    let walker = WalkDir::new(source)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_filtered(filter, entry));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            Error::snapshot(path, e.into())
        })?;
        if entry.depth() == 0 {
            continue;
        }

        let key = relative_key(source, entry.path())?;
        let rel = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let dst = workspace_root.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            io::create_dir_all(&dst)?;
        } else if file_type.is_file() {
            if let Some(parent) = dst.parent() {
                io::create_dir_all(parent)?;
            }
            let digest = io::copy_with_checksum(entry.path(), &dst)?;
            debug!(path = %key, %digest, "copied");
            manifest.insert(key, digest);
        } else {
            debug!(path = %key, "not a regular file, skipping");
        }
    }

    Ok(manifest)
}

/// Whether the walker should drop (and not descend into) this entry.
pub(crate) fn is_filtered(filter: &PathFilter, entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    filter.should_skip(&name, entry.file_type().is_dir(), entry.depth() == 0)
}
