//! Diagnostics reported during a run
//!
//! Every skip, parse failure and applied upgrade ends up here so the output
//! formatters can render it, optionally tied to a specific file and line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Informational (applied upgrades)
    Notice,
    /// Something was skipped but the run continued
    Warning,
    /// An operation failed but the run continued
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Notice => write!(f, "notice"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// What the diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Workflow file could not be parsed as YAML
    DocumentParse,
    /// Workflow file could not be read
    DocumentIo,
    /// Current tag is not a supported version
    UnsupportedTag,
    /// Release provider request failed
    ProviderFetch,
    /// No usable release tag was found
    NoCandidates,
    /// An upgrade was selected
    Upgrade,
    /// Writing an updated file failed
    Write,
}

/// A single structured diagnostic line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity
    pub level: Level,
    /// Category
    pub kind: DiagnosticKind,
    /// File the diagnostic belongs to, if file-scoped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// 1-based line inside `file`, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic not tied to a file
    pub fn new(level: Level, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            file: None,
            line: None,
            message: message.into(),
        }
    }

    /// Creates a notice
    pub fn notice(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Level::Notice, kind, message)
    }

    /// Creates a warning
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Level::Warning, kind, message)
    }

    /// Creates an error
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Level::Error, kind, message)
    }

    /// Ties the diagnostic to a file
    pub fn with_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Ties the diagnostic to a line in its file
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => {
                write!(f, "{}: {}:{}: {}", self.level, file.display(), line, self.message)
            }
            (Some(file), None) => write!(f, "{}: {}: {}", self.level, file.display(), self.message),
            _ => write!(f, "{}: {}", self.level, self.message),
        }
    }
}
