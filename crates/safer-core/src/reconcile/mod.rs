//! Reconciler: sync the workspace back into the original location
//!
//! - **classify**: pure three-way decision for a single path
//! - **engine**: walks the workspace, gathers digests, applies actions
//! - **report**: per-path outcomes, issues and aggregate counts

mod classify;
mod engine;
mod report;

pub use classify::{Classification, classify};
pub use engine::{ReconcileOptions, reconcile};
pub use report::{Counts, PathIssue, PathOutcome, ReconcileReport};
