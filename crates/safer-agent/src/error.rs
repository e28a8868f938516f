//! Error types for agent operations

use std::path::PathBuf;

/// Errors that can occur while preparing or running the agent
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Agent executable not found on PATH
    #[error("'{program}' not found in PATH.{}", .hint.as_deref().unwrap_or(""))]
    ProgramNotFound {
        /// The program name that was searched for
        program: String,
        /// Install instructions, when the program is known
        hint: Option<String>,
    },

    /// The agent process could not be started
    #[error("Failed to launch {program}: {source}")]
    Launch {
        /// The program that failed to start
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error while writing the policy
    #[error(transparent)]
    Fs(#[from] safer_fs::Error),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
