//! Session configuration
//!
//! Loaded from `<config dir>/safer-claude/config.toml` when present. Every
//! field has a default, so an empty or missing file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use safer_fs::{ConfigStore, JunkFiles, PathFilter};

use crate::Result;

/// Directory name under the platform config dir
const APP_DIR: &str = "safer-claude";
/// Config file name inside [`APP_DIR`]
const CONFIG_FILE: &str = "config.toml";
/// Name of the filter rule built from `filter.skip_names`
pub const CONFIGURED_SKIP_RULE: &str = "configured-skip";

/// Top-level session configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub agent: AgentConfig,
    pub workspace: WorkspaceConfig,
    pub filter: FilterConfig,
    pub policy: PolicyConfig,
}

/// Which agent to launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Program name looked up on `PATH`, or a path to an executable
    pub program: String,
    /// Extra arguments passed to the agent
    pub args: Vec<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            program: "claude".to_string(),
            args: Vec::new(),
        }
    }
}

/// Workspace creation and retention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Prefix of the temp directory name
    pub prefix: String,
    /// Keep the workspace when an edit could not be written back
    pub retain_on_write_error: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            prefix: "safer-claude-".to_string(),
            retain_on_write_error: true,
        }
    }
}

/// Additional entries to keep out of the sandbox
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// File names skipped at any depth, in addition to OS junk files
    pub skip_names: Vec<String>,
}

/// Overrides for the agent's sandbox policy; `None` keeps the built-in rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny: Option<Vec<String>>,
}

impl SessionConfig {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the config.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let store = ConfigStore::new();
        match path {
            Some(path) => Ok(store.load(path)?),
            None => match Self::default_path() {
                Some(default) => Ok(store.load_or_default(&default)?),
                None => Ok(Self::default()),
            },
        }
    }

    /// The path filter for this session: built-in rules plus `skip_names`.
    pub fn path_filter(&self) -> PathFilter {
        let filter = PathFilter::default();
        if self.filter.skip_names.is_empty() {
            filter
        } else {
            filter.with_rule(JunkFiles::named(
                CONFIGURED_SKIP_RULE,
                self.filter.skip_names.iter().cloned(),
            ))
        }
    }
}
