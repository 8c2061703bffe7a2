//! Application error types using thiserror
//!
//! Error hierarchy:
//! - DocumentError: Issues reading, parsing or writing workflow files
//! - RegistryError: Issues with release provider communication
//! - DiscoveryError: Issues locating workflow files
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Workflow document related errors
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Release provider related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Discovery related errors
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to workflow document operations
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to read workflow file
    #[error("failed to read workflow file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write workflow file
    #[error("failed to write workflow file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("failed to parse YAML in {path}: {message}")]
    YamlParseError { path: PathBuf, message: String },
}

/// Errors related to release provider communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Repository not found
    #[error("repository '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch releases for '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// Authentication error
    #[error("authentication failed for {registry}: {message}")]
    AuthenticationError { registry: String, message: String },
}

/// Errors related to workflow file discovery
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Root directory missing
    #[error("root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Glob pattern could not be compiled
    #[error("invalid file glob '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Directory walk failed
    #[error("failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Concurrency must be at least one
    #[error("invalid concurrency '{value}': expected a value of at least 1")]
    InvalidConcurrency { value: usize },

    /// Empty glob pattern
    #[error("file glob must not be empty")]
    EmptyPattern,

    /// No usable name prefix
    #[error("--prefixes must name at least one owner or action")]
    EmptyPrefixes,
}

impl DocumentError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new YamlParseError
    pub fn yaml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DocumentError::YamlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl DiscoveryError {
    /// Creates a new RootNotFound error
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        DiscoveryError::RootNotFound { path: path.into() }
    }

    /// Creates a new InvalidPattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        DiscoveryError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_read() {
        let err = DocumentError::read_error(
            "/path/to/ci.yml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("failed to read workflow file"));
        assert!(msg.contains("ci.yml"));
    }

    #[test]
    fn test_document_error_yaml_parse() {
        let err = DocumentError::yaml_parse_error("/path/to/ci.yml", "mapping values are not allowed");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse YAML"));
        assert!(msg.contains("mapping values"));
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("nonexistent/repo", "GitHub Releases");
        let msg = format!("{}", err);
        assert!(msg.contains("repository 'nonexistent/repo' not found"));
        assert!(msg.contains("GitHub Releases"));
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("actions/checkout", "GitHub Releases", "HTTP 500");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch releases"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn test_registry_error_rate_limit() {
        let err = RegistryError::rate_limit_exceeded("GitHub Releases");
        assert!(err.to_string().contains("rate limit exceeded"));
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("actions/cache", "GitHub Releases");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("actions/cache"));
    }

    #[test]
    fn test_discovery_error_root_not_found() {
        let err = DiscoveryError::root_not_found("/missing");
        assert!(err.to_string().contains("root directory not found"));
    }

    #[test]
    fn test_discovery_error_invalid_pattern() {
        let err = DiscoveryError::invalid_pattern("[unclosed", "unclosed character class");
        let msg = err.to_string();
        assert!(msg.contains("invalid file glob"));
        assert!(msg.contains("[unclosed"));
    }

    #[test]
    fn test_config_error_invalid_concurrency() {
        let err = ConfigError::InvalidConcurrency { value: 0 };
        assert!(err.to_string().contains("invalid concurrency"));
    }

    #[test]
    fn test_config_error_empty_prefixes() {
        let err = ConfigError::EmptyPrefixes;
        assert!(err.to_string().contains("--prefixes"));
    }

    #[test]
    fn test_app_error_from_discovery_error() {
        let app_err: AppError = DiscoveryError::root_not_found("/missing").into();
        assert!(app_err.to_string().contains("root directory not found"));
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let app_err: AppError = RegistryError::package_not_found("a/b", "GitHub Releases").into();
        assert!(app_err.to_string().contains("repository 'a/b' not found"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::EmptyPattern.into();
        assert!(app_err.to_string().contains("file glob must not be empty"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = DiscoveryError::root_not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("RootNotFound"));
    }
}
