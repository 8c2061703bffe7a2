//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of upgrade decisions
//! - Structured file-by-file line change information
//! - Diagnostics with their file and line location

use crate::domain::{Diagnostic, DocumentResult, Level, SkipReason, UpdateResult, UpdateSummary};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Summary statistics
    summary: JsonSummary,
    /// Selected upgrades, one per distinct reference
    upgrades: Vec<JsonUpgrade>,
    /// Skipped references
    skips: Vec<JsonSkip>,
    /// Per-file results
    files: Vec<JsonFile>,
    /// Diagnostics (notices only in verbose mode)
    diagnostics: Vec<&'a Diagnostic>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Workflow files scanned
    files_scanned: usize,
    /// Files with at least one rewritten line
    files_changed: usize,
    /// Files written to disk
    files_written: usize,
    /// Distinct references upgraded
    upgrades: usize,
    /// Distinct references skipped
    skips: usize,
}

/// JSON representation of an upgrade decision
#[derive(Serialize)]
struct JsonUpgrade {
    /// Action name
    name: String,
    /// Current tag
    from: String,
    /// Latest release tag
    to: String,
    /// Release publication time (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    released_at: Option<String>,
}

/// JSON representation of a skip
#[derive(Serialize)]
struct JsonSkip {
    /// Action name
    name: String,
    /// Current tag
    tag: String,
    /// Skip reason
    reason: String,
}

/// JSON representation of a workflow file result
#[derive(Serialize)]
struct JsonFile {
    /// Path relative to the scanned root
    path: String,
    /// Number of references found
    references: usize,
    /// Whether the file was written
    written: bool,
    /// Rewritten lines
    changes: Vec<JsonLineChange>,
    /// YAML parse error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_error: Option<String>,
}

/// JSON representation of a rewritten line
#[derive(Serialize)]
struct JsonLineChange {
    line: usize,
    name: String,
    from: String,
    to: String,
}

impl JsonFormatter {
    /// Convert skip reason to string
    fn skip_reason_to_string(reason: &SkipReason) -> String {
        match reason {
            SkipReason::UnsupportedTagFormat => "unsupported_tag_format".to_string(),
            SkipReason::NoCandidates => "no_candidates".to_string(),
            SkipReason::FetchFailed(msg) => format!("fetch_failed: {}", msg),
            SkipReason::AlreadyLatest => "already_latest".to_string(),
            SkipReason::Excluded => "excluded".to_string(),
        }
    }

    fn summary_to_json(summary: &UpdateSummary) -> JsonSummary {
        JsonSummary {
            files_scanned: summary.files_scanned(),
            files_changed: summary.files_changed(),
            files_written: summary.files_written(),
            upgrades: summary.total_upgrades(),
            skips: summary.total_skips(),
        }
    }

    /// Convert a workflow file result to JSON representation
    fn document_to_json(document: &DocumentResult) -> JsonFile {
        JsonFile {
            path: document.path.display().to_string(),
            references: document.references,
            written: document.written,
            changes: document
                .changes
                .iter()
                .map(|change| JsonLineChange {
                    line: change.line,
                    name: change.reference.name.clone(),
                    from: change.reference.tag.clone(),
                    to: change.new_tag.clone(),
                })
                .collect(),
            parse_error: document.parse_error.clone(),
        }
    }

    fn decisions_to_json(summary: &UpdateSummary) -> (Vec<JsonUpgrade>, Vec<JsonSkip>) {
        let mut upgrades = Vec::new();
        let mut skips = Vec::new();

        for decision in &summary.decisions {
            match decision {
                UpdateResult::Update {
                    reference,
                    new_tag,
                    released_at,
                } => upgrades.push(JsonUpgrade {
                    name: reference.name.clone(),
                    from: reference.tag.clone(),
                    to: new_tag.clone(),
                    released_at: released_at.map(|at| at.to_rfc3339()),
                }),
                UpdateResult::Skip { reference, reason } => skips.push(JsonSkip {
                    name: reference.name.clone(),
                    tag: reference.tag.clone(),
                    reason: Self::skip_reason_to_string(reason),
                }),
            }
        }

        (upgrades, skips)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let (upgrades, skips) = Self::decisions_to_json(&result.summary);
        let verbose = self.verbosity == Verbosity::Verbose;

        let output = JsonOutput {
            dry_run: result.summary.dry_run,
            summary: Self::summary_to_json(&result.summary),
            upgrades,
            skips,
            files: result
                .summary
                .documents
                .iter()
                .map(Self::document_to_json)
                .collect(),
            diagnostics: result
                .diagnostics
                .iter()
                .filter(|d| verbose || d.level != Level::Notice)
                .collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }

    fn format_summary(
        &self,
        summary: &UpdateSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&Self::summary_to_json(summary))
            .map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }

    fn format_document(
        &self,
        document: &DocumentResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&Self::document_to_json(document))
            .map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
