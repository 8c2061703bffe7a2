//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Optional bearer token authentication
//! - Status code to RegistryError mapping (single attempt, no retry)
//! - `Link: rel="next"` extraction for paginated APIs

use crate::error::RegistryError;
use regex::Regex;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, Response, StatusCode};
use std::sync::LazyLock;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("actup/", env!("CARGO_PKG_VERSION"));

/// Header reporting how many API calls remain in the current window
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// One `<url>; rel="next"` entry of a Link header
static NEXT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="?next"?"#).unwrap());

/// A decoded JSON body plus the URL of the following page, if any
#[derive(Debug)]
pub struct Page<T> {
    /// Decoded response body
    pub body: T,
    /// URL announced by `Link: <…>; rel="next"`
    pub next: Option<String>,
}

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::NetworkError {
                package: String::new(),
                registry: "HTTP client".to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Returns true if a token is configured
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Perform a GET request with error context
    pub async fn get_with_context(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        package: &str,
        registry: &str,
    ) -> Result<Response, RegistryError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::network_error(package, registry, e.to_string())
            }
        })?;

        check_status(response, package, registry)
    }

    /// Perform a GET request and decode one page of JSON
    pub async fn get_json_page<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        package: &str,
        registry: &str,
    ) -> Result<Page<T>, RegistryError> {
        let response = self.get_with_context(url, headers, package, registry).await?;
        let next = next_page_url(response.headers());

        let body = response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::invalid_response(
                    package,
                    registry,
                    format!("failed to parse JSON: {}", e),
                )
            }
        })?;

        Ok(Page { body, next })
    }
}

/// Map a non-success status to the matching RegistryError
fn check_status(
    response: Response,
    package: &str,
    registry: &str,
) -> Result<Response, RegistryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(RegistryError::package_not_found(package, registry)),
        StatusCode::TOO_MANY_REQUESTS => Err(RegistryError::rate_limit_exceeded(registry)),
        StatusCode::FORBIDDEN if is_rate_limited(response.headers()) => {
            Err(RegistryError::rate_limit_exceeded(registry))
        }
        StatusCode::UNAUTHORIZED => Err(RegistryError::AuthenticationError {
            registry: registry.to_string(),
            message: format!("HTTP {}", status),
        }),
        _ => Err(RegistryError::network_error(
            package,
            registry,
            format!("HTTP {}", status),
        )),
    }
}

/// A 403 counts as rate limiting only when the quota header says so
fn is_rate_limited(headers: &HeaderMap) -> bool {
    headers
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Extract the `rel="next"` URL from a Link header
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .find_map(|part| NEXT_LINK.captures(part).map(|c| c[1].to_string()))
}
