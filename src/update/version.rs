//! Release tag versioning
//!
//! This module provides:
//! - Parsing of tag strings (`v3`, `1.2`, `v4.1.0`) into comparable versions
//! - Granularity detection from the raw tag text
//! - Latest-tag selection over a list of release tags

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Optional `v` followed by dot-separated numeric components
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v?(\d+(?:\.\d+)*)$").unwrap());

/// Maximum number of numeric components a tag may carry
const MAX_COMPONENTS: usize = 3;

/// Parse a release tag into a normalized three-component version.
///
/// Accepts an optional leading `v` and one to three numeric components.
/// Missing components are padded with zero, so `v1` becomes `1.0.0`.
/// Returns `None` for pre-release suffixes, non-numeric components and
/// tags with more than three components.
pub fn parse_tag(tag: &str) -> Option<Version> {
    let captures = TAG_RE.captures(tag)?;
    let numbers = captures.get(1)?.as_str();

    let mut parts = Vec::with_capacity(MAX_COMPONENTS);
    for part in numbers.split('.') {
        parts.push(part.parse::<u64>().ok()?);
    }
    if parts.len() > MAX_COMPONENTS {
        return None;
    }
    parts.resize(MAX_COMPONENTS, 0);

    Some(Version::new(parts[0], parts[1], parts[2]))
}

/// Pick the tag with the strictly greatest version.
///
/// Unparseable tags are ignored. When two tags normalize to the same
/// version (`v2` and `2.0.0`), the one that comes first wins.
pub fn select_latest<S: AsRef<str>>(tags: &[S]) -> Option<&str> {
    let mut best: Option<(&str, Version)> = None;

    for tag in tags {
        let tag = tag.as_ref();
        let Some(version) = parse_tag(tag) else {
            continue;
        };
        let replace = match &best {
            Some((_, best_version)) => version > *best_version,
            None => true,
        };
        if replace {
            best = Some((tag, version));
        }
    }

    best.map(|(tag, _)| tag)
}

/// Returns true if `candidate` is strictly newer than `current`
pub fn is_upgrade(current: &Version, candidate: &Version) -> bool {
    candidate > current
}

/// How many version components a tag spells out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Only the major component (`v3`)
    Major,
    /// Major and minor (`v3.1`)
    Minor,
    /// Full major.minor.patch (`v3.1.2`)
    Patch,
}

impl Granularity {
    /// Determine granularity from the raw tag string.
    ///
    /// This must look at the original text: `parse_tag` pads to three
    /// components and would always report `Patch`.
    pub fn of(tag: &str) -> Self {
        let body = tag.strip_prefix('v').unwrap_or(tag);
        match body.split('.').count() {
            1 => Granularity::Major,
            2 => Granularity::Minor,
            _ => Granularity::Patch,
        }
    }

    /// Number of components this granularity keeps
    pub fn components(&self) -> usize {
        match self {
            Granularity::Major => 1,
            Granularity::Minor => 2,
            Granularity::Patch => 3,
        }
    }

    /// Cut `tag` down to this granularity, keeping its `v` prefix.
    ///
    /// A tag that is already less specific is returned as is.
    pub fn truncate(&self, tag: &str) -> String {
        let (prefix, body) = match tag.strip_prefix('v') {
            Some(rest) => ("v", rest),
            None => ("", tag),
        };
        let kept: Vec<&str> = body.split('.').take(self.components()).collect();
        format!("{}{}", prefix, kept.join("."))
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Granularity::Major => "major",
            Granularity::Minor => "minor",
            Granularity::Patch => "patch",
        };
        write!(f, "{}", label)
    }
}
