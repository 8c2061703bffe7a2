//! Workflow file discovery, scanning and rewriting
//!
//! This module provides functionality to:
//! - Discover workflow files under a repository root by glob
//! - Scan YAML for `uses: name@tag` references inside `steps`
//! - Rewrite references line by line, preserving formatting
//! - Write changed files (or only plan writes in dry-run mode)

mod detector;
mod rewriter;
mod scanner;
mod writer;

pub use detector::{discover_documents, DEFAULT_PATTERNS};
pub use rewriter::{apply, rewrite, Rewrite};
pub use scanner::{extract_references, load_document, scan_text, WorkflowDocument};
pub use writer::{read_document, write_document, DocumentWriter, WriteOutcome};
