//! Upgrade candidate set

use super::Reference;
use std::collections::BTreeMap;

/// Mapping from a current reference to the release tag it upgrades to.
///
/// Computed once per distinct `(name, tag)` pair and applied to every
/// occurrence in every workflow file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeSet {
    entries: BTreeMap<Reference, String>,
}

impl UpgradeSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an upgrade; the first tag recorded for a reference is kept
    pub fn insert(&mut self, reference: Reference, new_tag: impl Into<String>) -> bool {
        if self.entries.contains_key(&reference) {
            return false;
        }
        self.entries.insert(reference, new_tag.into());
        true
    }

    /// Looks up the new tag for a `(name, tag)` pair
    pub fn get(&self, reference: &Reference) -> Option<&str> {
        self.entries.get(reference).map(String::as_str)
    }

    /// Returns true if no upgrades were recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded upgrades
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over upgrades ordered by reference
    pub fn iter(&self) -> impl Iterator<Item = (&Reference, &str)> {
        self.entries.iter().map(|(r, t)| (r, t.as_str()))
    }
}

impl<N, T, V> FromIterator<((N, T), V)> for UpgradeSet
where
    N: Into<String>,
    T: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = ((N, T), V)>>(iter: I) -> Self {
        let mut set = UpgradeSet::new();
        for ((name, tag), new_tag) in iter {
            set.insert(Reference::new(name, tag), new_tag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut set = UpgradeSet::new();
        assert!(set.is_empty());
        assert!(set.insert(Reference::new("actions/checkout", "v3"), "v4"));
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(&Reference::new("actions/checkout", "v3")),
            Some("v4")
        );
        assert_eq!(set.get(&Reference::new("actions/checkout", "v4")), None);
    }

    #[test]
    fn test_first_insert_wins() {
        let mut set = UpgradeSet::new();
        set.insert(Reference::new("actions/checkout", "v3"), "v4");
        assert!(!set.insert(Reference::new("actions/checkout", "v3"), "v5"));
        assert_eq!(
            set.get(&Reference::new("actions/checkout", "v3")),
            Some("v4")
        );
    }

    #[test]
    fn test_from_iter() {
        let set: UpgradeSet = [
            (("actions/setup-node", "v3"), "v4"),
            (("actions/checkout", "v3"), "v4.1.0"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = set.iter().map(|(r, _)| r.name.as_str()).collect();
        assert_eq!(names, vec!["actions/checkout", "actions/setup-node"]);
    }
}
