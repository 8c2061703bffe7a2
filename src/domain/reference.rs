//! Action reference structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pinned dependency reference written as `name@tag`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    /// Dependency identifier (e.g., `actions/checkout`, `github/codeql-action/init`)
    pub name: String,
    /// Version tag exactly as written in the workflow (e.g., `v3`, `1.2.3`)
    pub tag: String,
}

impl Reference {
    /// Creates a new reference
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Parse a `uses` value into a reference.
    ///
    /// The value must contain exactly one `@` with text on both sides.
    pub fn parse(value: &str) -> Option<Self> {
        let (name, tag) = value.split_once('@')?;
        if name.is_empty() || tag.is_empty() || tag.contains('@') {
            return None;
        }
        Some(Self::new(name, tag))
    }

    /// The `owner/repo` part of the name that owns the releases.
    ///
    /// Actions living in a subdirectory (`github/codeql-action/init`) publish
    /// their releases on the parent repository.
    pub fn repository(&self) -> &str {
        repository_of(&self.name)
    }
}

/// Reduce an action name to its `owner/repo` prefix
pub fn repository_of(name: &str) -> &str {
    match name.match_indices('/').nth(1) {
        Some((index, _)) => &name[..index],
        None => name,
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.tag)
    }
}
