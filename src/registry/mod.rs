//! Release-tag providers
//!
//! This module provides:
//! - HTTP client shared foundation (timeout, token, status mapping)
//! - GitHub Releases API adapter
//! - Release tag model and stable tag filtering

mod client;
mod github;

pub use client::{next_page_url, HttpClient, Page};
pub use github::{GitHubReleasesAdapter, DEFAULT_API_URL};

use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A release published for a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseTag {
    /// Git tag the release points at
    pub tag: String,
    /// Whether the release is marked as a pre-release
    pub prerelease: bool,
    /// Whether the release is an unpublished draft
    pub draft: bool,
    /// Publish timestamp
    pub published_at: Option<DateTime<Utc>>,
}

impl ReleaseTag {
    /// Create a stable, published release tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            prerelease: false,
            draft: false,
            published_at: None,
        }
    }

    /// Mark as pre-release
    pub fn with_prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Mark as draft
    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Set the publish timestamp
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Returns true for a published, non pre-release entry
    pub fn is_stable(&self) -> bool {
        !self.prerelease && !self.draft
    }
}

/// Keep only releases that may become upgrade candidates
pub fn stable_tags(releases: &[ReleaseTag]) -> Vec<&ReleaseTag> {
    releases.iter().filter(|r| r.is_stable()).collect()
}

/// Trait for release-tag providers
#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Get the provider name
    fn registry_name(&self) -> &'static str;

    /// Fetch all releases published for the repository owning `name`
    async fn fetch_releases(&self, name: &str) -> Result<Vec<ReleaseTag>, RegistryError>;
}
