//! Snapshot and three-way reconciliation engine for safer-claude
//!
//! The engine copies a file or directory into an isolated workspace,
//! recording a baseline [`Manifest`] of content digests, and later
//! reconciles the (possibly edited) workspace back into the original
//! location:
//!
//! ```text
//!   snapshot(source) ──> Manifest ──> [agent edits workspace] ──> reconcile(workspace, original, Manifest)
//! ```
//!
//! Reconciliation compares three digests per path (baseline, workspace,
//! current original) and never overwrites an original that changed since
//! the snapshot. Conflicts are reported, not errors.
//!
//! # Example
//!
//! ```no_run
//! use safer_core::{ReconcileOptions, SyncTarget, Workspace, reconcile, snapshot};
//! use safer_fs::PathFilter;
//!
//! fn run() -> safer_core::Result<()> {
//!     let target = SyncTarget::resolve("notes")?;
//!     let workspace = Workspace::create("safer-claude-")?;
//!     let filter = PathFilter::default();
//!
//!     let manifest = snapshot(target.path(), workspace.root(), &filter)?;
//!     // ... let the agent edit workspace.root() ...
//!     let report = reconcile(
//!         workspace.root(),
//!         target.original_base(),
//!         &manifest,
//!         &filter,
//!         ReconcileOptions::default(),
//!     );
//!
//!     if report.must_retain(true) {
//!         workspace.retain();
//!     } else {
//!         workspace.discard()?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod reconcile;
pub mod snapshot;
pub mod target;
pub mod workspace;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use reconcile::{
    Classification, Counts, PathIssue, PathOutcome, ReconcileOptions, ReconcileReport, classify,
    reconcile,
};
pub use snapshot::snapshot;
pub use target::SyncTarget;
pub use workspace::Workspace;
