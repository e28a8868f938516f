//! Path filter shared by snapshot and reconciliation
//!
//! A [`PathFilter`] is a set of named [`SkipRule`]s. An entry is skipped when
//! any rule matches it. Skipping a directory prunes its whole subtree, so the
//! walkers must consult the filter before descending.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// OS metadata files that never belong in a sandbox.
pub const JUNK_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// A directory entry as seen by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Final path component
    pub name: &'a str,
    /// Whether the entry is a directory
    pub is_dir: bool,
    /// Whether the entry is the root of the walk
    pub is_root: bool,
}

impl<'a> Entry<'a> {
    pub fn new(name: &'a str, is_dir: bool, is_root: bool) -> Self {
        Self {
            name,
            is_dir,
            is_root,
        }
    }
}

/// A single named skip predicate.
pub trait SkipRule: Send + Sync + fmt::Debug {
    /// Unique name of the rule within a filter.
    fn name(&self) -> &str;

    /// Returns true if the entry must be excluded.
    fn should_skip(&self, entry: &Entry<'_>) -> bool;
}

/// Skips directories whose name starts with `.`, except the walk root.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenDirs;

impl SkipRule for HiddenDirs {
    fn name(&self) -> &str {
        "hidden-dirs"
    }

    fn should_skip(&self, entry: &Entry<'_>) -> bool {
        entry.is_dir && !entry.is_root && entry.name.starts_with('.')
    }
}

/// Skips files whose name is in a fixed denylist, at any depth.
#[derive(Debug, Clone)]
pub struct JunkFiles {
    name: String,
    names: BTreeSet<String>,
}

impl JunkFiles {
    /// A denylist rule under a custom name.
    pub fn named<I, S>(name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }
}

impl Default for JunkFiles {
    fn default() -> Self {
        Self::named("junk-files", JUNK_FILES.iter().copied())
    }
}

impl SkipRule for JunkFiles {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_skip(&self, entry: &Entry<'_>) -> bool {
        !entry.is_dir && self.names.contains(entry.name)
    }
}

/// A rule backed by a closure.
pub struct FnRule<F> {
    name: String,
    predicate: F,
}

impl<F> FnRule<F>
where
    F: Fn(&Entry<'_>) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish()
    }
}

impl<F> SkipRule for FnRule<F>
where
    F: Fn(&Entry<'_>) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn should_skip(&self, entry: &Entry<'_>) -> bool {
        (self.predicate)(entry)
    }
}

/// Ordered set of named skip rules.
///
/// Cloning is cheap; rules are shared.
#[derive(Debug, Clone)]
pub struct PathFilter {
    rules: Vec<Arc<dyn SkipRule>>,
}

impl Default for PathFilter {
    /// Hidden directories and OS junk files.
    fn default() -> Self {
        Self::empty()
            .with_rule(HiddenDirs)
            .with_rule(JunkFiles::default())
    }
}

impl PathFilter {
    /// A filter that keeps everything.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule, replacing any existing rule with the same name.
    pub fn with_rule(mut self, rule: impl SkipRule + 'static) -> Self {
        self.rules.retain(|r| r.name() != rule.name());
        self.rules.push(Arc::new(rule));
        self
    }

    /// Remove the rule with the given name, if present.
    pub fn without_rule(mut self, name: &str) -> Self {
        self.rules.retain(|r| r.name() != name);
        self
    }

    /// Names of the active rules in insertion order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Decide whether a directory entry is excluded.
    pub fn should_skip(&self, name: &str, is_dir: bool, is_root: bool) -> bool {
        self.skips(&Entry::new(name, is_dir, is_root))
    }

    pub fn skips(&self, entry: &Entry<'_>) -> bool {
        self.rules.iter().any(|rule| rule.should_skip(entry))
    }
}
