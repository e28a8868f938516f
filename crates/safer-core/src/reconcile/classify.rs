//! Three-way classification of a single path

use std::fmt;

use serde::{Deserialize, Serialize};

use safer_fs::ContentDigest;

/// Outcome of comparing baseline, workspace and original for one path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Workspace content equals the baseline; nothing to do
    Unchanged,
    /// Edited in the workspace, original untouched since the snapshot;
    /// the original is overwritten
    Synced,
    /// Edited in the workspace and changed externally; original kept
    ConflictModified,
    /// Edited in the workspace but the original is gone; nothing restored
    ConflictDeleted,
    /// Created in the workspace; copied to the original location
    New,
    /// Removed from the workspace; the original is kept
    DeletedInSession,
}

impl Classification {
    pub fn is_conflict(self) -> bool {
        matches!(self, Self::ConflictModified | Self::ConflictDeleted)
    }

    /// Whether this outcome writes to the original location.
    pub fn writes_original(self) -> bool {
        matches!(self, Self::Synced | Self::New)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unchanged => "unchanged",
            Self::Synced => "synced",
            Self::ConflictModified => "conflict-modified",
            Self::ConflictDeleted => "conflict-deleted",
            Self::New => "new",
            Self::DeletedInSession => "deleted-in-session",
        };
        f.write_str(s)
    }
}

/// Classify a workspace file.
///
/// * `baseline` - manifest digest, `None` if the path was not snapshotted
/// * `workspace` - digest of the workspace file now
/// * `original` - digest of the original file now, `None` if unreadable.
///   Only consulted when the workspace diverged from a present baseline.
///
/// An original that already carries the workspace content (both sides made
/// the same edit) is not a conflict and classifies as
/// [`Classification::Synced`].
pub fn classify(
    baseline: Option<&ContentDigest>,
    workspace: &ContentDigest,
    original: Option<&ContentDigest>,
) -> Classification {
    let Some(baseline) = baseline else {
        return Classification::New;
    };
    if baseline == workspace {
        return Classification::Unchanged;
    }
    match original {
        None => Classification::ConflictDeleted,
        Some(current) if current == baseline || current == workspace => Classification::Synced,
        Some(_) => Classification::ConflictModified,
    }
}

/// Whether [`classify`] needs the original's digest for this pair.
pub(crate) fn needs_original(baseline: Option<&ContentDigest>, workspace: &ContentDigest) -> bool {
    baseline.is_some_and(|b| b != workspace)
}
