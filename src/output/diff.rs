//! Diff output formatter for showing changes
//!
//! This module provides:
//! - Unified diff style display of rewritten workflow lines
//! - One hunk per changed line

use crate::domain::{DocumentResult, UpdateSummary};
use crate::orchestrator::OrchestratorResult;
use crate::output::OutputFormatter;
use std::io::Write;

/// Diff formatter for showing rewritten lines
pub struct DiffFormatter {
    /// Whether this is a dry-run
    dry_run: bool,
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> &'static str {
        if self.dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        for document in result.summary.changed_documents() {
            self.format_document(document, writer)?;
            writeln!(writer)?;
        }

        self.format_summary(&result.summary, writer)
    }

    fn format_summary(
        &self,
        summary: &UpdateSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let verb = if self.dry_run { "would be" } else { "were" };
        writeln!(
            writer,
            "# {}{} line(s) in {} file(s) {} updated",
            self.dry_run_prefix(),
            summary.total_line_changes(),
            summary.files_changed(),
            verb
        )
    }

    fn format_document(
        &self,
        document: &DocumentResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if !document.has_changes() {
            return Ok(());
        }

        writeln!(writer, "--- a/{}", document.path.display())?;
        writeln!(writer, "+++ b/{}", document.path.display())?;

        for change in &document.changes {
            writeln!(writer, "@@ -{line} +{line} @@", line = change.line)?;
            writeln!(writer, "-{}", change.before)?;
            writeln!(writer, "+{}", change.after)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::{empty_result, sample_result};

    fn render(formatter: &DiffFormatter, result: &OrchestratorResult) -> String {
        let mut output = Vec::new();
        formatter.format(result, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_dry_run_prefix() {
        assert_eq!(DiffFormatter::new(true).dry_run_prefix(), "(dry-run) ");
        assert_eq!(DiffFormatter::new(false).dry_run_prefix(), "");
    }

    #[test]
    fn test_format_diff() {
        let output = render(&DiffFormatter::new(false), &sample_result(false));

        assert!(output.contains("--- a/.github/workflows/ci.yml\n+++ b/.github/workflows/ci.yml\n"));
        assert!(output.contains(
            "@@ -7 +7 @@\n-      - uses: actions/checkout@v3\n+      - uses: actions/checkout@v4\n"
        ));
        assert!(output.contains("@@ -9 +9 @@"));
        assert!(!output.contains("lint.yml"));
        assert!(output.ends_with("# 2 line(s) in 1 file(s) were updated\n"));
    }

    #[test]
    fn test_format_diff_dry_run() {
        let output = render(&DiffFormatter::new(true), &sample_result(true));
        assert!(output.contains("# (dry-run) 2 line(s) in 1 file(s) would be updated"));
    }

    #[test]
    fn test_format_diff_no_changes() {
        let output = render(&DiffFormatter::new(false), &empty_result(false));
        assert_eq!(output, "# 0 line(s) in 0 file(s) were updated\n");
    }

    #[test]
    fn test_format_document_without_changes() {
        let mut output = Vec::new();
        DiffFormatter::new(false)
            .format_document(&DocumentResult::new("ci.yml"), &mut output)
            .unwrap();
        assert!(output.is_empty());
    }
}
