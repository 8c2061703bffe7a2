//! GitHub workflow command formatter
//!
//! Emits `::notice::`, `::warning::` and `::error::` commands so results show
//! up as annotations in the Actions UI, followed by plain per-file lines.

use crate::domain::{Diagnostic, DocumentResult, Level, UpdateSummary};
use crate::orchestrator::OrchestratorResult;
use crate::output::OutputFormatter;
use std::io::Write;

/// Formatter for GitHub workflow commands
pub struct AnnotationFormatter {
    /// Whether this is a dry-run
    dry_run: bool,
}

impl AnnotationFormatter {
    /// Create a new annotation formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Render one diagnostic as a workflow command
    fn command(diagnostic: &Diagnostic) -> String {
        let mut properties = Vec::new();
        if let Some(file) = &diagnostic.file {
            properties.push(format!("file={}", escape_property(&file.display().to_string())));
        }
        if let Some(line) = diagnostic.line {
            properties.push(format!("line={}", line));
        }

        let properties = if properties.is_empty() {
            String::new()
        } else {
            format!(" {}", properties.join(","))
        };

        format!(
            "::{}{}::{}",
            diagnostic.level,
            properties,
            escape_data(&diagnostic.message)
        )
    }
}

/// Escapes a workflow command message
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a workflow command property value
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

impl OutputFormatter for AnnotationFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // Notices first, in the order upgrades were applied
        let (notices, problems): (Vec<&Diagnostic>, Vec<&Diagnostic>) = result
            .diagnostics
            .iter()
            .partition(|d| d.level == Level::Notice);

        for diagnostic in notices.into_iter().chain(problems) {
            writeln!(writer, "{}", Self::command(diagnostic))?;
        }

        for document in result.summary.changed_documents() {
            self.format_document(document, writer)?;
        }

        self.format_summary(&result.summary, writer)
    }

    fn format_summary(
        &self,
        summary: &UpdateSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.dry_run {
            writeln!(
                writer,
                "Dry run complete. Files with updates: {}",
                summary.files_changed()
            )?;
        }
        Ok(())
    }

    fn format_document(
        &self,
        document: &DocumentResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if !document.has_changes() {
            return Ok(());
        }

        if document.written {
            writeln!(writer, "Updated {}", document.path.display())
        } else {
            writeln!(writer, "Planned update in {}", document.path.display())
        }
    }
}
