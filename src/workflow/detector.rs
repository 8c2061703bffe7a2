//! Workflow file discovery
//!
//! Features:
//! - Glob patterns relative to the repository root (`*` stays within a directory)
//! - Walks only below each pattern's literal directory prefix
//! - Sorted, de-duplicated results

use crate::error::DiscoveryError;
use globset::{GlobBuilder, GlobMatcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Default workflow file patterns
pub const DEFAULT_PATTERNS: &[&str] = &[".github/**/*.yml", ".github/**/*.yaml"];

/// Find all files under `root` matching any of `patterns`
///
/// This function:
/// 1. Checks that `root` is an existing directory
/// 2. Compiles every pattern, failing on the first invalid one
/// 3. Walks each pattern's literal prefix directory and collects matches
pub fn discover_documents<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::root_not_found(root));
    }

    let compiled = patterns
        .iter()
        .map(|p| compile(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut found = BTreeSet::new();
    for (pattern, matcher) in &compiled {
        let base = root.join(literal_prefix(pattern));
        if !base.is_dir() {
            debug!(pattern = %pattern, base = %base.display(), "pattern base does not exist");
            continue;
        }

        for entry in WalkDir::new(&base).follow_links(false) {
            let entry = entry.map_err(|e| DiscoveryError::Walk {
                path: base.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let rel_posix = rel.to_string_lossy().replace('\\', "/");
            if matcher.is_match(&rel_posix) {
                found.insert(entry.path().to_path_buf());
            }
        }
    }

    debug!(root = %root.display(), files = found.len(), "discovered workflow files");
    Ok(found.into_iter().collect())
}

/// Compile one pattern with `*` not crossing `/`
fn compile(pattern: &str) -> Result<(String, GlobMatcher), DiscoveryError> {
    let normalized = pattern.trim_start_matches("./").to_string();
    let glob = GlobBuilder::new(&normalized)
        .literal_separator(true)
        .build()
        .map_err(|e| DiscoveryError::invalid_pattern(pattern, e.kind().to_string()))?;
    Ok((normalized, glob.compile_matcher()))
}

/// The leading directory components of `pattern` that contain no glob syntax
fn literal_prefix(pattern: &str) -> PathBuf {
    let components: Vec<&str> = pattern.split('/').collect();
    let dirs = &components[..components.len().saturating_sub(1)];
    dirs.iter()
        .take_while(|c| !c.contains(['*', '?', '[', '{']))
        .filter(|c| !c.is_empty() && **c != ".")
        .collect()
}
