//! Workspace lifecycle
//!
//! A workspace is created fresh per session and persisted on disk right
//! away; it disappears only through an explicit [`Workspace::discard`]. An
//! interrupted session therefore leaves the agent's output behind for
//! manual recovery.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{Error, Result};

/// Isolated directory the agent edits
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a new workspace in the system temp directory.
    pub fn create(prefix: &str) -> Result<Self> {
        Self::create_in(std::env::temp_dir(), prefix)
    }

    /// Create a new workspace under `parent`.
    pub fn create_in(parent: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let parent = parent.as_ref();
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(parent)
            .map_err(|source| Error::Workspace {
                path: parent.to_path_buf(),
                source,
            })?;
        let root = dir.keep();
        debug!(root = %root.display(), "workspace created");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove the workspace and everything in it.
    pub fn discard(self) -> Result<()> {
        fs::remove_dir_all(&self.root).map_err(|source| Error::Workspace {
            path: self.root.clone(),
            source,
        })?;
        debug!(root = %self.root.display(), "workspace removed");
        Ok(())
    }

    /// Keep the workspace on disk and return its path.
    pub fn retain(self) -> PathBuf {
        info!(root = %self.root.display(), "workspace retained");
        self.root
    }
}
