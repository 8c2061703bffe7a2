//! Workflow file writing
//!
//! This module provides:
//! - DocumentWriter that writes a rewritten workflow only when it changed
//! - Dry-run mode support (no actual file modifications)
//! - Path-carrying read/write helpers

use crate::error::DocumentError;
use std::fs;
use std::path::Path;
use tracing::info;

/// What happened to a document when its rewrite was committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Rewritten text equals the original
    Unchanged,
    /// Text changed but dry-run mode kept the file as is
    Planned,
    /// Text changed and was written to disk
    Written,
}

impl WriteOutcome {
    /// Returns true if the document differs from its original text
    pub fn is_changed(&self) -> bool {
        !matches!(self, WriteOutcome::Unchanged)
    }
}

/// Writer for workflow files
pub struct DocumentWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl DocumentWriter {
    /// Create a new DocumentWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a DocumentWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `updated` to `path` if it differs from `original`
    pub fn write_if_changed(
        &self,
        path: &Path,
        original: &str,
        updated: &str,
    ) -> Result<WriteOutcome, DocumentError> {
        if original == updated {
            return Ok(WriteOutcome::Unchanged);
        }
        if self.dry_run {
            return Ok(WriteOutcome::Planned);
        }

        write_document(path, updated)?;
        info!(file = %path.display(), "updated workflow file");
        Ok(WriteOutcome::Written)
    }
}

/// Read a workflow file as UTF-8 text
pub fn read_document(path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(path).map_err(|e| DocumentError::read_error(path, e))
}

/// Write content to a workflow file
pub fn write_document(path: &Path, content: &str) -> Result<(), DocumentError> {
    fs::write(path, content).map_err(|e| DocumentError::write_error(path, e))
}
