//! Locating and running the agent

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, info};

use crate::error::{AgentError, Result};

/// Find `program` on `PATH`.
///
/// A name containing a path separator is taken as a path and only checked
/// for existence.
pub fn find_program(program: &str) -> Result<PathBuf> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    find_program_in(program, &path_var)
}

/// Find `program` in an explicit `PATH`-style search list.
pub fn find_program_in(program: &str, path_var: &OsStr) -> Result<PathBuf> {
    let as_path = Path::new(program);
    if as_path.components().count() > 1 {
        return if as_path.is_file() {
            Ok(as_path.to_path_buf())
        } else {
            Err(not_found(program))
        };
    }

    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    for dir in std::env::split_paths(path_var) {
        for ext in &extensions {
            let candidate = dir.join(format!("{}{}", program, ext));
            if is_executable(&candidate) {
                debug!(program, path = %candidate.display(), "found agent");
                return Ok(candidate);
            }
        }
    }

    Err(not_found(program))
}

fn not_found(program: &str) -> AgentError {
    AgentError::ProgramNotFound {
        program: program.to_string(),
        hint: install_hint(program).map(str::to_string),
    }
}

fn install_hint(program: &str) -> Option<&'static str> {
    match program {
        "claude" => Some("\n  Install Claude Code: https://docs.anthropic.com/en/docs/claude-code"),
        _ => None,
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// How the agent process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentExit {
    status: ExitStatus,
}

impl AgentExit {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

impl std::fmt::Display for AgentExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.status.fmt(f)
    }
}

/// Runs the agent interactively inside a workspace
///
/// The child inherits stdin, stdout and stderr, so the user talks to the
/// agent directly. [`launch`](Self::launch) blocks until it exits.
#[derive(Debug, Clone)]
pub struct AgentLauncher {
    program: PathBuf,
    args: Vec<String>,
}

impl AgentLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append arguments passed to the agent.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the agent with `workspace` as its working directory and wait.
    ///
    /// Only a failure to start the process is an error. A non-zero exit is
    /// returned as an [`AgentExit`] for the caller to judge.
    pub fn launch(&self, workspace: &Path) -> Result<AgentExit> {
        info!(
            program = %self.program.display(),
            workspace = %workspace.display(),
            args = ?self.args,
            "launching agent"
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(workspace)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| AgentError::Launch {
                program: self.program.clone(),
                source,
            })?;

        debug!(%status, "agent exited");
        Ok(AgentExit { status })
    }
}
