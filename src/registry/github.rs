//! GitHub Releases API adapter
//!
//! Lists the releases of the repository owning an action, following
//! `Link` pagination up to a fixed page limit.

use super::{HttpClient, ReleaseProvider, ReleaseTag};
use crate::domain::repository_of;
use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Default base URL for the GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Registry name used in errors and logs
const REGISTRY_NAME: &str = "GitHub Releases";

/// Releases requested per page (API maximum)
const PER_PAGE: u32 = 100;

/// Upper bound on pages followed for one repository
const MAX_PAGES: usize = 10;

/// Headers sent with every GitHub API request
const GITHUB_HEADERS: &[(&str, &str)] = &[
    ("Accept", "application/vnd.github+json"),
    ("X-GitHub-Api-Version", "2022-11-28"),
];

/// One entry of the releases list
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    prerelease: bool,
    #[serde(default)]
    draft: bool,
    published_at: Option<DateTime<Utc>>,
}

impl From<Release> for ReleaseTag {
    fn from(release: Release) -> Self {
        ReleaseTag {
            tag: release.tag_name,
            prerelease: release.prerelease,
            draft: release.draft,
            published_at: release.published_at,
        }
    }
}

/// Release provider backed by the GitHub Releases API
pub struct GitHubReleasesAdapter {
    client: HttpClient,
    api_url: String,
}

impl GitHubReleasesAdapter {
    /// Create a new adapter against the public API
    pub fn new(client: HttpClient) -> Self {
        Self::with_api_url(client, DEFAULT_API_URL)
    }

    /// Create a new adapter against a custom API base (GHES or a test server)
    pub fn with_api_url(client: HttpClient, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// URL of the first releases page for `repository`
    fn releases_url(&self, repository: &str) -> String {
        format!(
            "{}/repos/{}/releases?per_page={}",
            self.api_url, repository, PER_PAGE
        )
    }
}

#[async_trait]
impl ReleaseProvider for GitHubReleasesAdapter {
    fn registry_name(&self) -> &'static str {
        REGISTRY_NAME
    }

    async fn fetch_releases(&self, name: &str) -> Result<Vec<ReleaseTag>, RegistryError> {
        let repository = repository_of(name);
        if !repository.contains('/') {
            return Err(RegistryError::package_not_found(name, REGISTRY_NAME));
        }

        let mut releases = Vec::new();
        let mut url = Some(self.releases_url(repository));
        let mut pages = 0;

        while let Some(current) = url.take() {
            if pages == MAX_PAGES {
                debug!(repository, pages, "stopping at page limit");
                break;
            }
            let page = self
                .client
                .get_json_page::<Vec<Release>>(&current, GITHUB_HEADERS, repository, REGISTRY_NAME)
                .await?;
            pages += 1;
            releases.extend(page.body.into_iter().map(ReleaseTag::from));
            url = page.next;
        }

        debug!(repository, releases = releases.len(), pages, "fetched releases");
        Ok(releases)
    }
}
