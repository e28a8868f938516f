//! Reconciliation report types

use serde::{Deserialize, Serialize};

use super::Classification;

/// Final classification of one relative path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOutcome {
    /// Path relative to the workspace root, forward slashes
    pub path: String,
    pub classification: Classification,
}

/// A path that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathIssue {
    /// Path relative to the workspace root, forward slashes
    pub path: String,
    /// The classification the path was given before the failure, if any
    pub classification: Option<Classification>,
    /// Human-readable description of the failure
    pub message: String,
}

/// Aggregate counts per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub unchanged: usize,
    pub synced: usize,
    pub new: usize,
    pub conflict_modified: usize,
    pub conflict_deleted: usize,
    pub deleted_in_session: usize,
    /// Workspace files that could not be hashed
    pub skipped: usize,
    /// Synced or new files that could not be written back
    pub write_errors: usize,
}

impl Counts {
    pub fn conflicts(&self) -> usize {
        self.conflict_modified + self.conflict_deleted
    }
}

/// Report from a reconciliation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Classified paths, workspace walk order then deletions
    pub outcomes: Vec<PathOutcome>,
    /// Soft failures: the path was left out of reconciliation
    pub skipped: Vec<PathIssue>,
    /// Write-back failures for paths classified synced or new
    pub write_errors: Vec<PathIssue>,
    /// Whether the pass ran without touching the original location
    pub dry_run: bool,
}

impl ReconcileReport {
    pub(crate) fn record(&mut self, path: String, classification: Classification) {
        self.outcomes.push(PathOutcome {
            path,
            classification,
        });
    }

    pub(crate) fn skip(&mut self, path: String, message: String) {
        self.skipped.push(PathIssue {
            path,
            classification: None,
            message,
        });
    }

    pub(crate) fn write_failed(
        &mut self,
        path: String,
        classification: Classification,
        message: String,
    ) {
        self.write_errors.push(PathIssue {
            path,
            classification: Some(classification),
            message,
        });
    }

    /// Classification of a path, if it was classified successfully.
    pub fn classification_of(&self, path: &str) -> Option<Classification> {
        self.outcomes
            .iter()
            .find(|o| o.path == path)
            .map(|o| o.classification)
    }

    /// Outcomes with the given classification.
    pub fn paths(&self, classification: Classification) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(move |o| o.classification == classification)
            .map(|o| o.path.as_str())
    }

    pub fn counts(&self) -> Counts {
        let mut counts = Counts {
            skipped: self.skipped.len(),
            write_errors: self.write_errors.len(),
            ..Counts::default()
        };
        for outcome in &self.outcomes {
            match outcome.classification {
                Classification::Unchanged => counts.unchanged += 1,
                Classification::Synced => counts.synced += 1,
                Classification::ConflictModified => counts.conflict_modified += 1,
                Classification::ConflictDeleted => counts.conflict_deleted += 1,
                Classification::New => counts.new += 1,
                Classification::DeletedInSession => counts.deleted_in_session += 1,
            }
        }
        counts
    }

    pub fn conflicts_exist(&self) -> bool {
        self.outcomes.iter().any(|o| o.classification.is_conflict())
    }

    pub fn has_write_errors(&self) -> bool {
        !self.write_errors.is_empty()
    }

    /// Whether the workspace holds agent output that did not make it back.
    ///
    /// Conflicts always require retention; write-back failures do when
    /// `on_write_error` is set.
    pub fn must_retain(&self, on_write_error: bool) -> bool {
        self.conflicts_exist() || (on_write_error && self.has_write_errors())
    }

    /// One-line summary, e.g. `Sync complete: 1 synced, 0 new, 2 unchanged, 0 conflicts`.
    pub fn summary_line(&self) -> String {
        let counts = self.counts();
        let mut line = format!(
            "Sync complete: {} synced, {} new, {} unchanged, {} conflicts",
            counts.synced,
            counts.new,
            counts.unchanged,
            counts.conflicts()
        );
        if counts.deleted_in_session > 0 {
            line.push_str(&format!(", {} deleted in session", counts.deleted_in_session));
        }
        if counts.write_errors > 0 {
            line.push_str(&format!(", {} failed", counts.write_errors));
        }
        if counts.skipped > 0 {
            line.push_str(&format!(", {} skipped", counts.skipped));
        }
        if self.dry_run {
            line.push_str(" (dry run)");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ReconcileReport {
        let mut report = ReconcileReport::default();
        report.record("a.txt".into(), Classification::Unchanged);
        report.record("b.txt".into(), Classification::Synced);
        report.record("c.txt".into(), Classification::ConflictModified);
        report.record("gone.txt".into(), Classification::DeletedInSession);
        report
    }

    #[test]
    fn test_counts() {
        let counts = sample().counts();
        assert_eq!(
            counts,
            Counts {
                unchanged: 1,
                synced: 1,
                conflict_modified: 1,
                deleted_in_session: 1,
                ..Counts::default()
            }
        );
        assert_eq!(counts.conflicts(), 1);
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            sample().summary_line(),
            "Sync complete: 1 synced, 0 new, 1 unchanged, 1 conflicts, 1 deleted in session"
        );
    }

    #[test]
    fn test_retention_on_write_error_is_policy_driven() {
        let mut report = ReconcileReport::default();
        report.write_failed("x.txt".into(), Classification::New, "denied".into());

        assert!(!report.conflicts_exist());
        assert!(report.must_retain(true));
        assert!(!report.must_retain(false));
    }

    #[test]
    fn test_conflicts_always_retain() {
        assert!(sample().must_retain(false));
    }

    #[test]
    fn test_paths_by_classification() {
        let report = sample();
        assert_eq!(report.paths(Classification::Synced).collect::<Vec<_>>(), vec!["b.txt"]);
        assert_eq!(report.classification_of("c.txt"), Some(Classification::ConflictModified));
        assert_eq!(report.classification_of("zzz"), None);
    }
}
