//! Baseline manifest captured at snapshot time

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use safer_fs::ContentDigest;

/// Relative path -> content digest of every file copied into the workspace.
///
/// Keys use forward slashes regardless of platform. A manifest is built once
/// by [`snapshot`](crate::snapshot::snapshot) and is read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, ContentDigest>,
}

impl Manifest {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, digest: ContentDigest) {
        self.entries.insert(key, digest);
    }

    /// Baseline digest for a relative path.
    pub fn get(&self, key: &str) -> Option<&ContentDigest> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentDigest)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, ContentDigest)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, ContentDigest)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
