//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One block per changed workflow file with its rewritten references
//! - Semantic version change type indication (major/minor/patch)
//! - Diagnostics (warnings and errors; notices in verbose mode)
//! - Skipped reference display with reasons (verbose mode)
//! - Summary with detailed breakdown

use crate::domain::{Diagnostic, DocumentResult, Level, UpdateResult, UpdateSummary};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use crate::update::parse_tag;
use colored::Colorize;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two tags
    pub fn from_tags(old: &str, new: &str) -> Self {
        match (parse_tag(old), parse_tag(new)) {
            (Some(old), Some(new)) => {
                if new.major != old.major {
                    VersionChangeType::Major
                } else if new.minor != old.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self::with_color(verbosity, dry_run, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if !self.dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    /// Header verb for a changed file
    fn file_verb(&self, document: &DocumentResult) -> &'static str {
        if document.written {
            "Updated"
        } else {
            "Planned update in"
        }
    }

    /// Calculate the maximum reference name length for alignment
    fn max_name_length(&self, document: &DocumentResult) -> usize {
        document
            .changes
            .iter()
            .map(|c| c.reference.name.len())
            .max()
            .unwrap_or(0)
    }

    /// Format a single diagnostic line
    fn format_diagnostic(
        &self,
        diagnostic: &Diagnostic,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if !self.color {
            return writeln!(writer, "  {}", diagnostic);
        }
        let marker = match diagnostic.level {
            Level::Notice => "•".dimmed(),
            Level::Warning => "!".yellow().bold(),
            Level::Error => "✗".red().bold(),
        };
        let location = match (&diagnostic.file, diagnostic.line) {
            (Some(file), Some(line)) => format!("{}:{}: ", file.display(), line),
            (Some(file), None) => format!("{}: ", file.display()),
            _ => String::new(),
        };
        writeln!(
            writer,
            "  {} {}{}",
            marker,
            location.dimmed(),
            diagnostic.message
        )
    }

    /// Format skipped references in verbose mode
    fn format_skips(&self, summary: &UpdateSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let skips: Vec<&UpdateResult> = summary.skips().collect();
        if skips.is_empty() {
            return Ok(());
        }

        if self.color {
            writeln!(writer, "{}", "Skipped:".dimmed())?;
        } else {
            writeln!(writer, "Skipped:")?;
        }
        let width = skips
            .iter()
            .map(|s| s.reference().to_string().len())
            .max()
            .unwrap_or(0);
        for skip in skips {
            if let UpdateResult::Skip { reference, reason } = skip {
                let name = format!("{:width$}", reference.to_string(), width = width);
                if self.color {
                    writeln!(writer, "  {} {}", name.dimmed(), format!("({})", reason).dimmed())?;
                } else {
                    writeln!(writer, "  {} ({})", name, reason)?;
                }
            }
        }
        writeln!(writer)
    }

    /// Count upgraded references by change type
    fn count_by_change_type(&self, summary: &UpdateSummary) -> (usize, usize, usize, usize) {
        let mut major = 0;
        let mut minor = 0;
        let mut patch = 0;
        let mut unknown = 0;

        for result in summary.updates() {
            if let UpdateResult::Update {
                reference, new_tag, ..
            } = result
            {
                match VersionChangeType::from_tags(&reference.tag, new_tag) {
                    VersionChangeType::Major => major += 1,
                    VersionChangeType::Minor => minor += 1,
                    VersionChangeType::Patch => patch += 1,
                    VersionChangeType::Unknown => unknown += 1,
                }
            }
        }

        (major, minor, patch, unknown)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(&result.summary, writer);
        }

        for document in result.summary.changed_documents() {
            self.format_document(document, writer)?;
        }

        if self.verbosity == Verbosity::Verbose {
            self.format_skips(&result.summary, writer)?;
        }

        // Notices repeat the per-file lines, so they only show in verbose mode
        let diagnostics: Vec<&Diagnostic> = result
            .diagnostics
            .iter()
            .filter(|d| d.level != Level::Notice || self.verbosity == Verbosity::Verbose)
            .collect();
        if !diagnostics.is_empty() {
            if self.color {
                writeln!(writer, "{}:", "Diagnostics".yellow().bold())?;
            } else {
                writeln!(writer, "Diagnostics:")?;
            }
            for diagnostic in diagnostics {
                self.format_diagnostic(diagnostic, writer)?;
            }
            writeln!(writer)?;
        }

        self.format_summary(&result.summary, writer)
    }

    fn format_summary(
        &self,
        summary: &UpdateSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        let files = summary.files_changed();
        let upgrades = summary.total_upgrades();
        let skips = summary.total_skips();

        if self.verbosity == Verbosity::Quiet {
            if files > 0 {
                let verb = if self.dry_run { "to update" } else { "updated" };
                if self.color {
                    writeln!(writer, "{}{} file(s) {}", prefix, files.to_string().green(), verb)?;
                } else {
                    writeln!(writer, "{}{} file(s) {}", prefix, files, verb)?;
                }
            } else if self.color {
                writeln!(writer, "{}{}", prefix, "No updates".dimmed())?;
            } else {
                writeln!(writer, "{}No updates", prefix)?;
            }
            return Ok(());
        }

        let (major, minor, patch, unknown) = self.count_by_change_type(summary);
        let mut parts = Vec::new();
        if major > 0 {
            parts.push(format!("{} major", major));
        }
        if minor > 0 {
            parts.push(format!("{} minor", minor));
        }
        if patch > 0 {
            parts.push(format!("{} patch", patch));
        }
        if unknown > 0 {
            parts.push(format!("{} other", unknown));
        }

        if self.color {
            writeln!(writer, "{}{}:", prefix, "Summary".bold())?;
        } else {
            writeln!(writer, "{}Summary:", prefix)?;
        }

        writeln!(writer, "  {} workflow file(s) scanned", summary.files_scanned())?;
        if upgrades > 0 {
            let count = if self.color {
                upgrades.to_string().green().to_string()
            } else {
                upgrades.to_string()
            };
            writeln!(
                writer,
                "  {} reference(s) upgraded ({}) in {} file(s)",
                count,
                parts.join(", "),
                files
            )?;
        } else if self.color {
            writeln!(writer, "  {}", "No references upgraded".dimmed())?;
        } else {
            writeln!(writer, "  No references upgraded")?;
        }
        if skips > 0 {
            writeln!(writer, "  {} reference(s) skipped", skips)?;
        }
        if self.dry_run {
            writeln!(writer, "Dry run complete. Files with updates: {}", files)?;
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

        let prefix = self.dry_run_prefix();
        let verb = self.file_verb(document);
        let path_display = document.path.display().to_string();
        let count = document.change_count();
        let noun = if count == 1 { "change" } else { "changes" };

        if self.color {
            writeln!(
                writer,
                "{}{} {} {}",
                prefix,
                verb,
                path_display.bold(),
                format!("({} {})", count, noun).dimmed()
            )?;
        } else {
            writeln!(writer, "{}{} {} ({} {})", prefix, verb, path_display, count, noun)?;
        }

        let width = self.max_name_length(document).max(20);
        for change in &document.changes {
            let change_type = VersionChangeType::from_tags(&change.reference.tag, &change.new_tag);
            if self.color {
                writeln!(
                    writer,
                    "  {} {} {} {} [{}] {}",
                    format!("{:width$}", change.reference.name, width = width),
                    change.reference.tag.dimmed(),
                    "→".dimmed(),
                    change.new_tag.bright_white().bold(),
                    change_type.colored_label(),
                    format!("line {}", change.line).dimmed()
                )?;
            } else {
                writeln!(
                    writer,
                    "  {:width$} {} -> {} [{}] line {}",
                    change.reference.name,
                    change.reference.tag,
                    change.new_tag,
                    change_type.label(),
                    change.line,
                    width = width
                )?;
            }
        }

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::{empty_result, sample_result};
    use rstest::rstest;

    fn render(formatter: &TextFormatter, result: &OrchestratorResult) -> String {
        let mut output = Vec::new();
        formatter.format(result, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case("v3", "v4", VersionChangeType::Major)]
    #[case("v3.1", "v3.2", VersionChangeType::Minor)]
    #[case("1.2.3", "1.2.4", VersionChangeType::Patch)]
    #[case("v3", "v3.0.1", VersionChangeType::Patch)]
    #[case("main", "v4", VersionChangeType::Unknown)]
    fn test_version_change_type(
        #[case] old: &str,
        #[case] new: &str,
        #[case] expected: VersionChangeType,
    ) {
        assert_eq!(VersionChangeType::from_tags(old, new), expected);
    }

    #[test]
    fn test_version_change_type_labels() {
        assert_eq!(VersionChangeType::Major.label(), "major");
        assert_eq!(VersionChangeType::Unknown.label(), "?");
    }

    #[test]
    fn test_format_written_files() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false, false);
        let output = render(&formatter, &sample_result(false));

        assert!(output.contains("Updated .github/workflows/ci.yml (2 changes)"));
        assert!(output.contains("actions/checkout     v3 -> v4 [major] line 7"));
        assert!(output.contains("actions/cache        v3.1 -> v4.2 [major] line 9"));
        assert!(!output.contains("lint.yml"));
        assert!(output.contains("2 reference(s) upgraded (2 major) in 1 file(s)"));
        assert!(output.contains("1 reference(s) skipped"));
        assert!(!output.contains("Dry run complete"));
    }

    #[test]
    fn test_format_dry_run() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, true, false);
        let output = render(&formatter, &sample_result(true));

        assert!(output.contains("(dry-run) Planned update in .github/workflows/ci.yml"));
        assert!(output.contains("Dry run complete. Files with updates: 1"));
    }

    #[test]
    fn test_format_diagnostics_hide_notices_by_default() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false, false);
        let output = render(&formatter, &sample_result(false));

        assert!(output.contains("warning: Skipping actions/setup-node@main: unsupported tag format"));
        assert!(output.contains("warning: .github/workflows/broken.yml: failed to parse YAML"));
        assert!(!output.contains("notice:"));
    }

    #[test]
    fn test_format_verbose_shows_notices_and_skips() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false, false);
        let output = render(&formatter, &sample_result(false));

        assert!(output.contains(
            "notice: .github/workflows/ci.yml:7: Updated actions/checkout from v3 to v4.1.0"
        ));
        assert!(output.contains("Skipped:"));
        assert!(output.contains("actions/setup-node@main (unsupported tag format)"));
    }

    #[test]
    fn test_format_quiet() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false, false);
        assert_eq!(render(&formatter, &sample_result(false)), "1 file(s) updated\n");
        assert_eq!(render(&formatter, &empty_result(false)), "No updates\n");
    }

    #[test]
    fn test_format_no_changes() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false, false);
        let output = render(&formatter, &empty_result(false));

        assert!(output.contains("1 workflow file(s) scanned"));
        assert!(output.contains("No references upgraded"));
        assert!(!output.contains("Diagnostics"));
    }

    #[test]
    fn test_format_with_color_does_not_panic() {
        let formatter = TextFormatter::new(Verbosity::Verbose, true);
        let output = render(&formatter, &sample_result(true));
        assert!(output.contains("ci.yml"));
    }
}
