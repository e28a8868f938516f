//! The sandboxed agent session
//!
//! Snapshot the target into a fresh workspace, run the agent there, then
//! reconcile its edits back and decide whether the workspace is kept.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;
use tracing::{debug, warn};

use safer_agent::{AgentLauncher, SandboxPolicy, find_program};
use safer_core::{
    Classification, ReconcileOptions, ReconcileReport, SessionConfig, SyncTarget, Workspace,
    reconcile, snapshot,
};

use crate::error::Result;

/// Exit code when the session finished but left work behind
pub const EXIT_INCOMPLETE: i32 = 2;

/// Options gathered from the command line
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub target: PathBuf,
    /// Overrides `agent.program` from the config
    pub agent: Option<String>,
    pub config: Option<PathBuf>,
    /// Appended after `agent.args` from the config
    pub agent_args: Vec<String>,
    pub keep_workspace: bool,
    pub dry_run: bool,
    pub json: bool,
}

/// Result of a completed session
#[derive(Debug, Serialize)]
pub struct SessionOutcome {
    /// Workspace path, if it was kept
    pub workspace: Option<PathBuf>,
    pub report: ReconcileReport,
}

impl SessionOutcome {
    /// 0 when everything made it back, [`EXIT_INCOMPLETE`] otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.report.conflicts_exist() || self.report.has_write_errors() {
            EXIT_INCOMPLETE
        } else {
            0
        }
    }
}

/// Run one session end to end.
///
/// Errors before the agent starts discard the workspace. Once the agent has
/// run, reconciliation always happens and only the retention decision
/// depends on its result.
pub fn run_session(options: &SessionOptions) -> Result<SessionOutcome> {
    let mut config = SessionConfig::load(options.config.as_deref())?;
    if let Some(agent) = &options.agent {
        config.agent.program = agent.clone();
    }

    let target = SyncTarget::resolve(&options.target)?;
    let program = find_program(&config.agent.program)?;
    let filter = config.path_filter();

    let workspace = Workspace::create(&config.workspace.prefix)?;

    let manifest = match snapshot(target.path(), workspace.root(), &filter) {
        Ok(manifest) => manifest,
        Err(e) => {
            discard_quietly(workspace);
            return Err(e.into());
        }
    };

    let policy = SandboxPolicy::with_overrides(
        config.policy.allow.clone(),
        config.policy.deny.clone(),
    );
    if let Err(e) = policy.write(workspace.root()) {
        discard_quietly(workspace);
        return Err(e.into());
    }

    status(options.json, &format!("Copied to {}", workspace.root().display()));
    status(
        options.json,
        &format!("Launching {}...\n", program.display()),
    );

    let launcher = AgentLauncher::new(program.clone()).args(
        config
            .agent
            .args
            .iter()
            .chain(options.agent_args.iter())
            .cloned(),
    );
    match launcher.launch(workspace.root()) {
        Ok(exit) if !exit.success() => {
            eprintln!(
                "\n{} agent exited with {}",
                "WARNING:".yellow().bold(),
                exit
            );
            eprintln!("Attempting to sync any changes...\n");
        }
        Ok(_) => {}
        Err(e) => {
            discard_quietly(workspace);
            return Err(e.into());
        }
    }

    let report = reconcile(
        workspace.root(),
        target.original_base(),
        &manifest,
        &filter,
        ReconcileOptions {
            dry_run: options.dry_run,
        },
    );

    let retain = options.keep_workspace
        || options.dry_run
        || report.must_retain(config.workspace.retain_on_write_error);

    let workspace = if retain {
        Some(workspace.retain())
    } else {
        let root = workspace.root().to_path_buf();
        if let Err(e) = workspace.discard() {
            warn!(workspace = %root.display(), error = %e, "could not remove workspace");
        }
        None
    };

    let outcome = SessionOutcome { workspace, report };
    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_report(&outcome, options);
    }
    Ok(outcome)
}

/// Progress line; goes to stderr when stdout carries JSON.
fn status(json: bool, line: &str) {
    if json {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

fn discard_quietly(workspace: Workspace) {
    let root = workspace.root().to_path_buf();
    if let Err(e) = workspace.discard() {
        warn!(workspace = %root.display(), error = %e, "could not remove workspace");
    } else {
        debug!(workspace = %root.display(), "workspace discarded");
    }
}

fn print_report(outcome: &SessionOutcome, options: &SessionOptions) {
    let report = &outcome.report;
    let copy_of = |path: &str| -> String {
        outcome
            .workspace
            .as_deref()
            .map(|root| root.join(path).display().to_string())
            .unwrap_or_else(|| path.to_string())
    };

    for o in &report.outcomes {
        match o.classification {
            Classification::Unchanged => {}
            Classification::Synced => {
                println!("  {} {}", "SYNCED:".green().bold(), o.path);
            }
            Classification::New => {
                println!("  {} {}", "NEW:".green().bold(), o.path);
            }
            Classification::ConflictModified => {
                println!(
                    "  {} {} was modified both externally and in session",
                    "CONFLICT:".red().bold(),
                    o.path
                );
                println!("           Temp copy: {}", copy_of(&o.path));
            }
            Classification::ConflictDeleted => {
                println!(
                    "  {} {} was deleted externally but edited in session",
                    "CONFLICT:".red().bold(),
                    o.path
                );
                println!("           Temp copy: {}", copy_of(&o.path));
            }
            Classification::DeletedInSession => {
                println!(
                    "  {} {}",
                    "DELETED in session (original kept):".yellow(),
                    o.path
                );
            }
        }
    }

    for issue in &report.write_errors {
        eprintln!(
            "  {} could not sync {}: {}",
            "ERROR:".red().bold(),
            issue.path,
            issue.message
        );
    }
    for issue in &report.skipped {
        eprintln!(
            "  {} skipped {}: {}",
            "WARNING:".yellow().bold(),
            issue.path,
            issue.message
        );
    }

    println!("\n{}", report.summary_line());

    if let Some(root) = &outcome.workspace {
        println!("{}", retention_message(report, options, root));
    }
}

fn retention_message(report: &ReconcileReport, options: &SessionOptions, root: &Path) -> String {
    let reason = if report.conflicts_exist() {
        "due to conflicts"
    } else if report.has_write_errors() {
        "due to write errors"
    } else if options.dry_run {
        "(dry run)"
    } else {
        "as requested"
    };
    format!("Temp directory kept {}: {}", reason, root.display())
}
