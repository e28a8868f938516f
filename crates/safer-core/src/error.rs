//! Error types for safer-core

use std::path::PathBuf;

/// Result type for safer-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in safer-core operations
///
/// Only hard failures appear here. Per-path problems during reconciliation
/// and conflicts are part of the
/// [`ReconcileReport`](crate::reconcile::ReconcileReport).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file or directory to sandbox does not exist
    #[error("Target not found: {path}")]
    TargetNotFound { path: PathBuf },

    /// The target is neither a regular file nor a directory
    #[error("Unsupported target (not a regular file or directory): {path}")]
    UnsupportedTarget { path: PathBuf },

    /// The target lives on a network share
    #[error("Target is excluded from sandboxing by the path filter: {path}")]
    FilteredTarget { path: PathBuf },

    #[error("Network paths are not supported: {path}")]
    NetworkTarget { path: PathBuf },

    /// Walking or reading the source tree failed during snapshot
    #[error("Snapshot failed at {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workspace directory could not be created or removed
    #[error("Workspace error at {path}: {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from safer-fs
    #[error(transparent)]
    Fs(#[from] safer_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn snapshot(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Snapshot {
            path: path.into(),
            source,
        }
    }
}
