//! Error types for safer-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a session early
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from safer-core
    #[error(transparent)]
    Core(#[from] safer_core::Error),

    /// Error from safer-agent
    #[error(transparent)]
    Agent(#[from] safer_agent::AgentError),

    /// Report serialization error
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
