//! Upgrade run summary types
//!
//! Provides structures for tracking results at line, file and overall levels.

use super::{Reference, UpdateResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single rewritten line inside a workflow file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    /// 1-based line number
    pub line: usize,
    /// Line content before the rewrite, without line ending
    pub before: String,
    /// Line content after the rewrite, without line ending
    pub after: String,
    /// The reference that matched on this line
    pub reference: Reference,
    /// The tag written, already truncated to the original granularity
    pub new_tag: String,
}

/// Result for a single workflow file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Path to the workflow file
    pub path: PathBuf,
    /// Number of references found in the file
    pub references: usize,
    /// Lines rewritten (or that would be rewritten in dry-run mode)
    pub changes: Vec<LineChange>,
    /// Whether the file was actually written
    pub written: bool,
    /// YAML parse error, if the file could not be scanned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl DocumentResult {
    /// Creates a new DocumentResult
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            references: 0,
            changes: Vec::new(),
            written: false,
            parse_error: None,
        }
    }

    /// Returns true if any line changed
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Returns the number of rewritten lines
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }
}

/// Overall summary of an upgrade run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSummary {
    /// Results for each workflow file scanned
    pub documents: Vec<DocumentResult>,
    /// One decision per distinct reference considered
    pub decisions: Vec<UpdateResult>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl UpdateSummary {
    /// Creates a new UpdateSummary
    pub fn new(dry_run: bool) -> Self {
        Self {
            documents: Vec::new(),
            decisions: Vec::new(),
            dry_run,
        }
    }

    /// Adds a document result
    pub fn add_document(&mut self, document: DocumentResult) {
        self.documents.push(document);
    }

    /// Adds an upgrade decision
    pub fn add_decision(&mut self, decision: UpdateResult) {
        self.decisions.push(decision);
    }

    /// Returns the total number of files scanned
    pub fn files_scanned(&self) -> usize {
        self.documents.len()
    }

    /// Returns the number of files with changes (planned or written)
    pub fn files_changed(&self) -> usize {
        self.documents.iter().filter(|d| d.has_changes()).count()
    }

    /// Returns the number of files actually written
    pub fn files_written(&self) -> usize {
        self.documents.iter().filter(|d| d.written).count()
    }

    /// Returns the number of distinct references upgraded
    pub fn total_upgrades(&self) -> usize {
        self.decisions.iter().filter(|d| d.is_update()).count()
    }

    /// Returns the number of distinct references skipped
    pub fn total_skips(&self) -> usize {
        self.decisions.iter().filter(|d| d.is_skip()).count()
    }

    /// Returns the number of rewritten lines across all files
    pub fn total_line_changes(&self) -> usize {
        self.documents.iter().map(|d| d.change_count()).sum()
    }

    /// Returns true if any file changed
    pub fn has_changes(&self) -> bool {
        self.files_changed() > 0
    }

    /// Returns all upgrade decisions
    pub fn updates(&self) -> impl Iterator<Item = &UpdateResult> {
        self.decisions.iter().filter(|d| d.is_update())
    }

    /// Returns all skip decisions
    pub fn skips(&self) -> impl Iterator<Item = &UpdateResult> {
        self.decisions.iter().filter(|d| d.is_skip())
    }

    /// Returns documents that changed
    pub fn changed_documents(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents.iter().filter(|d| d.has_changes())
    }
}

impl Default for UpdateSummary {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkipReason;

    fn sample_change(line: usize) -> LineChange {
        LineChange {
            line,
            before: "      - uses: actions/checkout@v3".to_string(),
            after: "      - uses: actions/checkout@v4".to_string(),
            reference: Reference::new("actions/checkout", "v3"),
            new_tag: "v4".to_string(),
        }
    }

    #[test]
    fn test_document_result_new() {
        let doc = DocumentResult::new(".github/workflows/ci.yml");
        assert_eq!(doc.path, PathBuf::from(".github/workflows/ci.yml"));
        assert!(!doc.has_changes());
        assert!(!doc.written);
        assert!(doc.parse_error.is_none());
    }

    #[test]
    fn test_document_result_changes() {
        let mut doc = DocumentResult::new("ci.yml");
        doc.changes.push(sample_change(4));
        doc.changes.push(sample_change(9));
        assert!(doc.has_changes());
        assert_eq!(doc.change_count(), 2);
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = UpdateSummary::new(true);

        let mut changed = DocumentResult::new("a.yml");
        changed.changes.push(sample_change(3));
        summary.add_document(changed);
        summary.add_document(DocumentResult::new("b.yml"));

        summary.add_decision(UpdateResult::update(
            Reference::new("actions/checkout", "v3"),
            "v4",
        ));
        summary.add_decision(UpdateResult::skip(
            Reference::new("actions/cache", "main"),
            SkipReason::UnsupportedTagFormat,
        ));

        assert!(summary.dry_run);
        assert_eq!(summary.files_scanned(), 2);
        assert_eq!(summary.files_changed(), 1);
        assert_eq!(summary.files_written(), 0);
        assert_eq!(summary.total_upgrades(), 1);
        assert_eq!(summary.total_skips(), 1);
        assert_eq!(summary.total_line_changes(), 1);
        assert!(summary.has_changes());
        assert_eq!(summary.changed_documents().count(), 1);
    }

    #[test]
    fn test_summary_default() {
        let summary = UpdateSummary::default();
        assert!(!summary.dry_run);
        assert!(!summary.has_changes());
    }
}
