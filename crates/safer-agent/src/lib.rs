//! Agent integration for safer-claude
//!
//! This crate prepares a workspace for the coding agent and runs it:
//!
//! - Writing the sandbox policy the agent reads from `.claude/settings.json`
//! - Locating the agent executable on `PATH`
//! - Launching the agent interactively inside the workspace
//!
//! The agent is an opaque external program. Its exit status is reported
//! back to the caller but never decides whether reconciliation happens.

pub mod error;
pub mod launcher;
pub mod policy;

pub use error::{AgentError, Result};
pub use launcher::{AgentExit, AgentLauncher, find_program, find_program_in};
pub use policy::{Permissions, SandboxPolicy};
