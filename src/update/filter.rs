//! Reference filter configuration
//!
//! This module provides the ReferenceFilter struct that decides which
//! references take part in an upgrade run.

use crate::domain::Reference;

/// Filter configuration for reference selection
#[derive(Debug, Clone, Default)]
pub struct ReferenceFilter {
    /// Name prefixes to include (empty matches nothing)
    pub prefixes: Vec<String>,
    /// Names to never upgrade
    pub exclude: Vec<String>,
}

impl ReferenceFilter {
    /// Create a new ReferenceFilter with no prefixes and no exclusions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set prefixes to include
    pub fn with_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Set names to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Check if a name falls under one of the configured prefixes.
    ///
    /// `actions` matches `actions/checkout` but not `actions-rs/toolchain`.
    pub fn matches_prefix(&self, name: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            name == prefix
                || name
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Check if a reference has been excluded by name or repository
    pub fn is_excluded(&self, reference: &Reference) -> bool {
        self.exclude
            .iter()
            .any(|e| e == &reference.name || e == reference.repository())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_filter() {
        let filter = ReferenceFilter::new();
        assert!(filter.prefixes.is_empty());
        assert!(filter.exclude.is_empty());
    }

    #[test]
    fn test_empty_prefixes_match_nothing() {
        let filter = ReferenceFilter::new();
        assert!(!filter.matches_prefix("actions/checkout"));
        assert!(!filter.matches_prefix("docker/build-push-action"));
    }

    #[test]
    fn test_matches_prefix_on_owner_boundary() {
        let filter = ReferenceFilter::new().with_prefixes(prefixes(&["actions"]));
        assert!(filter.matches_prefix("actions/checkout"));
        assert!(filter.matches_prefix("actions/cache/restore"));
        assert!(!filter.matches_prefix("actions-rs/toolchain"));
        assert!(!filter.matches_prefix("org/tool"));
    }

    #[test]
    fn test_matches_prefix_full_name() {
        let filter = ReferenceFilter::new().with_prefixes(prefixes(&["docker/login-action/"]));
        assert!(filter.matches_prefix("docker/login-action"));
        assert!(!filter.matches_prefix("docker/login-action-extra"));
    }

    #[test]
    fn test_multiple_prefixes() {
        let filter = ReferenceFilter::new().with_prefixes(prefixes(&["actions", "github"]));
        assert!(filter.matches_prefix("github/codeql-action/init"));
        assert!(filter.matches_prefix("actions/setup-node"));
        assert!(!filter.matches_prefix("aws-actions/configure-aws-credentials"));
    }

    #[test]
    fn test_is_excluded() {
        let filter = ReferenceFilter::new().with_exclude(prefixes(&["github/codeql-action"]));
        let init = Reference::new("github/codeql-action/init", "v2");
        let checkout = Reference::new("actions/checkout", "v3");
        assert!(filter.is_excluded(&init));
        assert!(!filter.is_excluded(&checkout));
    }

    #[test]
    fn test_chained_builders() {
        let filter = ReferenceFilter::new()
            .with_prefixes(prefixes(&["actions"]))
            .with_exclude(prefixes(&["actions/cache"]));

        assert_eq!(filter.prefixes, vec!["actions"]);
        assert_eq!(filter.exclude, vec!["actions/cache"]);
    }
}
