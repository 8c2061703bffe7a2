//! Upgrade decision result types

use super::Reference;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why a reference upgrade was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Current tag does not follow the `v?MAJOR[.MINOR[.PATCH]]` grammar
    UnsupportedTagFormat,
    /// No stable, parseable release tag was available
    NoCandidates,
    /// Release provider request failed
    FetchFailed(String),
    /// Already at (or ahead of) the latest release
    AlreadyLatest,
    /// Name was excluded via --exclude
    Excluded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedTagFormat => write!(f, "unsupported tag format"),
            SkipReason::NoCandidates => write!(f, "no valid release tags found"),
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            SkipReason::AlreadyLatest => write!(f, "already at latest"),
            SkipReason::Excluded => write!(f, "excluded by --exclude"),
        }
    }
}

/// Result of an upgrade decision for a single distinct reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateResult {
    /// Reference will be upgraded
    Update {
        /// The reference being upgraded
        reference: Reference,
        /// The latest release tag, before granularity truncation
        new_tag: String,
        /// When the selected release was published, if known
        #[serde(skip_serializing_if = "Option::is_none")]
        released_at: Option<DateTime<Utc>>,
    },
    /// Reference upgrade was skipped
    Skip {
        /// The reference that was skipped
        reference: Reference,
        /// The reason for skipping
        reason: SkipReason,
    },
}

impl UpdateResult {
    /// Creates an Update result
    pub fn update(reference: Reference, new_tag: impl Into<String>) -> Self {
        UpdateResult::Update {
            reference,
            new_tag: new_tag.into(),
            released_at: None,
        }
    }

    /// Creates an Update result with the release publication date
    pub fn update_with_date(
        reference: Reference,
        new_tag: impl Into<String>,
        released_at: Option<DateTime<Utc>>,
    ) -> Self {
        UpdateResult::Update {
            reference,
            new_tag: new_tag.into(),
            released_at,
        }
    }

    /// Creates a Skip result
    pub fn skip(reference: Reference, reason: SkipReason) -> Self {
        UpdateResult::Skip { reference, reason }
    }

    /// Returns true if this is an update result
    pub fn is_update(&self) -> bool {
        matches!(self, UpdateResult::Update { .. })
    }

    /// Returns true if this is a skip result
    pub fn is_skip(&self) -> bool {
        matches!(self, UpdateResult::Skip { .. })
    }

    /// Returns the reference this decision is about
    pub fn reference(&self) -> &Reference {
        match self {
            UpdateResult::Update { reference, .. } => reference,
            UpdateResult::Skip { reference, .. } => reference,
        }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateResult::Update {
                reference, new_tag, ..
            } => {
                write!(
                    f,
                    "Updated {} from {} to {}",
                    reference.name, reference.tag, new_tag
                )
            }
            UpdateResult::Skip { reference, reason } => {
                write!(f, "Skipping {} ({})", reference, reason)
            }
        }
    }
}
