//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Run a coding agent on a sandboxed copy of a file or directory
///
/// The target is copied into a fresh temporary workspace, the agent runs
/// there, and afterwards only the agent's changes are copied back. Files
/// that were also changed outside the session are reported as conflicts
/// and left untouched.
#[derive(Parser, Debug)]
#[command(name = "safer-claude")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File or directory to work on
    pub target: PathBuf,

    /// Agent program to launch (name on PATH or a path)
    #[arg(long, value_name = "PROGRAM", env = "SAFER_CLAUDE_AGENT")]
    pub agent: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the workspace even when everything synced cleanly
    #[arg(long)]
    pub keep_workspace: bool,

    /// Classify changes but do not write anything back
    #[arg(long)]
    pub dry_run: bool,

    /// Print the sync report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Arguments passed through to the agent
    #[arg(last = true, value_name = "AGENT_ARGS")]
    pub agent_args: Vec<String>,
}
