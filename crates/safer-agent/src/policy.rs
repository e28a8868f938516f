//! Sandbox policy for the agent
//!
//! The agent reads `<workspace>/.claude/settings.json` at startup. The
//! default rules deny reads and edits that climb out of the workspace and
//! the shell commands most commonly used to dump file contents.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use safer_fs::ConfigStore;

use crate::Result;

/// Directory holding the agent's project settings
pub const SETTINGS_DIR: &str = ".claude";
/// Settings file inside [`SETTINGS_DIR`]
pub const SETTINGS_FILE: &str = "settings.json";

/// Built-in deny rules
pub const DEFAULT_DENY: &[&str] = &[
    "Read(../)",
    "Read(../../**)",
    "Edit(../)",
    "Edit(../../**)",
    "Bash(cat *)",
    "Bash(head *)",
    "Bash(tail *)",
    "Bash(less *)",
    "Bash(more *)",
];

/// Permission rule lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
}

/// The settings document written into the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxPolicy {
    pub permissions: Permissions,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            permissions: Permissions {
                allow: Vec::new(),
                deny: DEFAULT_DENY.iter().map(|r| r.to_string()).collect(),
            },
        }
    }
}

impl SandboxPolicy {
    /// Built-in rules with optional replacements for either list.
    pub fn with_overrides(allow: Option<Vec<String>>, deny: Option<Vec<String>>) -> Self {
        let mut policy = Self::default();
        if let Some(allow) = allow {
            policy.permissions.allow = allow;
        }
        if let Some(deny) = deny {
            policy.permissions.deny = deny;
        }
        policy
    }

    /// Location of the settings file for a workspace.
    pub fn settings_path(workspace: &Path) -> PathBuf {
        workspace.join(SETTINGS_DIR).join(SETTINGS_FILE)
    }

    /// Write the policy into `workspace`, creating `.claude/` as needed.
    pub fn write(&self, workspace: &Path) -> Result<PathBuf> {
        let path = Self::settings_path(workspace);
        ConfigStore::new().save(&path, self)?;
        debug!(
            path = %path.display(),
            deny = self.permissions.deny.len(),
            allow = self.permissions.allow.len(),
            "wrote sandbox policy"
        );
        Ok(path)
    }
}
