//! Upgrade judgment logic for action references
//!
//! This module provides:
//! - Reference filter configuration from CLI args
//! - Tag parsing, granularity and latest-tag selection
//! - Upgrade judgment engine that decides whether to upgrade or skip

mod filter;
mod version;

pub use filter::ReferenceFilter;
pub use version::{is_upgrade, parse_tag, select_latest, Granularity};

use crate::domain::{Reference, SkipReason, UpdateResult};
use crate::registry::{stable_tags, ReleaseTag};

/// Upgrade judgment engine
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeJudge;

impl UpgradeJudge {
    /// Create a new UpgradeJudge
    pub fn new() -> Self {
        Self
    }

    /// Judge whether to upgrade a reference given the releases of its repository
    pub fn judge(&self, reference: &Reference, releases: &[ReleaseTag]) -> UpdateResult {
        let Some(current) = parse_tag(&reference.tag) else {
            return UpdateResult::skip(reference.clone(), SkipReason::UnsupportedTagFormat);
        };

        // Pre-releases and drafts never become candidates
        let stable = stable_tags(releases);
        let tags: Vec<&str> = stable.iter().map(|r| r.tag.as_str()).collect();

        let Some(latest) = select_latest(&tags) else {
            return UpdateResult::skip(reference.clone(), SkipReason::NoCandidates);
        };

        // parse_tag succeeded inside select_latest
        let Some(candidate) = parse_tag(latest) else {
            return UpdateResult::skip(reference.clone(), SkipReason::NoCandidates);
        };

        // `v4` with latest `v4.2.2` (or `3` with `v3.1.0`) is already current
        // at its own granularity
        let truncated = Granularity::of(&reference.tag).truncate(latest);
        let moves = parse_tag(&truncated).is_some_and(|t| is_upgrade(&current, &t));
        if !is_upgrade(&current, &candidate) || !moves {
            return UpdateResult::skip(reference.clone(), SkipReason::AlreadyLatest);
        }

        let released_at = stable
            .iter()
            .find(|r| r.tag == latest)
            .and_then(|r| r.published_at);

        UpdateResult::update_with_date(reference.clone(), latest, released_at)
    }
}
