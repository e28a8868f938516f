//! Reconciliation pass over the workspace
//!
//! For each file in the workspace the engine gathers up to three digests,
//! classifies the path and applies the matching action to the original
//! location. The "original still equals baseline" check is an optimistic
//! guard, not a lock: an external write landing between the check and the
//! overwrite is not detected.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use safer_fs::{PathFilter, compute_file_checksum, io, join_key, relative_key};

use super::classify::{Classification, classify, needs_original};
use super::report::ReconcileReport;
use crate::Manifest;
use crate::snapshot::is_filtered;

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// If true, classify every path but write nothing to the original location.
    pub dry_run: bool,
}

/// Reconcile `workspace_root` into `original_base` against `manifest`.
///
/// Never fails as a whole: unreadable workspace files and names that are
/// not valid UTF-8 are recorded as skipped, write-back failures as write
/// errors, and the walk continues.
/// Manifest paths no longer present in the workspace are reported as
/// [`Classification::DeletedInSession`]; their originals are left alone.
pub fn reconcile(
    workspace_root: &Path,
    original_base: &Path,
    manifest: &Manifest,
    filter: &PathFilter,
    options: ReconcileOptions,
) -> ReconcileReport {
    info!(
        workspace = %workspace_root.display(),
        original = %original_base.display(),
        baseline = manifest.len(),
        dry_run = options.dry_run,
        "reconciling"
    );

    let mut report = ReconcileReport {
        dry_run: options.dry_run,
        ..ReconcileReport::default()
    };
    let mut seen: HashSet<String> = HashSet::new();
    // Directories the walk could not read; their contents are unknown, not deleted.
    let mut unreadable: Vec<String> = Vec::new();

    let walker = WalkDir::new(workspace_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_filtered(filter, entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(workspace_root);
                let shown = display_key(workspace_root, path);
                warn!(path = %shown, error = %e, "could not read workspace entry");
                match relative_key(workspace_root, path) {
                    Ok(key) => unreadable.push(key),
                    Err(_) if path == workspace_root => unreadable.push(".".to_string()),
                    Err(_) => {}
                }
                report.skip(shown, e.to_string());
                continue;
            }
        };
        if entry.depth() == 0 || entry.file_type().is_dir() {
            continue;
        }
        let key = match relative_key(workspace_root, entry.path()) {
            Ok(key) => key,
            Err(e) => {
                let shown = display_key(workspace_root, entry.path());
                warn!(path = %shown, error = %e, "no usable key, leaving it in the workspace");
                report.skip(shown, e.to_string());
                continue;
            }
        };
        seen.insert(key.clone());

        if !entry.file_type().is_file() {
            warn!(path = %key, "not a regular file, leaving it in the workspace");
            report.skip(key, "not a regular file".to_string());
            continue;
        }

        reconcile_file(
            &mut report,
            key,
            entry.path(),
            original_base,
            manifest,
            options,
        );
    }

    for key in manifest.keys() {
        if !seen.contains(key) && !under_any(key, &unreadable) {
            debug!(path = %key, "deleted in session, original kept");
            report.record(key.to_string(), Classification::DeletedInSession);
        }
    }

    info!("{}", report.summary_line());
    report
}

/// Lossy forward-slash form of `path` for report entries that have no key.
fn display_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    if rel.as_os_str().is_empty() {
        ".".to_string()
    } else {
        rel.to_string_lossy().replace('\\', "/")
    }
}

fn under_any(key: &str, dirs: &[String]) -> bool {
    dirs.iter().any(|dir| {
        dir == "."
            || key == dir
            || key
                .strip_prefix(dir.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn reconcile_file(
    report: &mut ReconcileReport,
    key: String,
    workspace_file: &Path,
    original_base: &Path,
    manifest: &Manifest,
    options: ReconcileOptions,
) {
    let workspace_digest = match compute_file_checksum(workspace_file) {
        Ok(digest) => digest,
        Err(e) => {
            warn!(path = %key, error = %e, "could not hash workspace file");
            report.skip(key, format!("could not hash workspace file: {}", e));
            return;
        }
    };

    let baseline = manifest.get(&key);
    let original_path = join_key(original_base, &key);

    let original_digest = if needs_original(baseline, &workspace_digest) {
        match compute_file_checksum(&original_path) {
            Ok(digest) => Some(digest),
            Err(e) => {
                debug!(path = %key, error = %e, "original unreadable");
                None
            }
        }
    } else {
        None
    };

    let classification = classify(baseline, &workspace_digest, original_digest.as_ref());
    debug!(path = %key, %classification, "classified");

    if classification.writes_original()
        && !options.dry_run
        && let Err(e) = io::replace_file(workspace_file, &original_path)
    {
        error!(path = %key, %classification, error = %e, "write-back failed");
        report.write_failed(key, classification, e.to_string());
        return;
    }

    report.record(key, classification);
}
