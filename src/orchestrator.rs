//! Upgrade orchestrator for coordinating the entire run
//!
//! This module provides:
//! - Run coordination: discover → scan → filter → fetch → judge → rewrite → write
//! - Concurrent release fetches bounded by a semaphore
//! - Dry-run mode support
//! - Diagnostics collection with partial continuation

use crate::cli::RunConfig;
use crate::domain::{
    Diagnostic, DiagnosticKind, DocumentResult, Level, Reference, SkipReason, UpdateResult,
    UpdateSummary, UpgradeSet,
};
use crate::error::{DiscoveryError, DocumentError};
use crate::progress::Progress;
use crate::registry::{GitHubReleasesAdapter, HttpClient, ReleaseProvider, ReleaseTag};
use crate::update::{parse_tag, ReferenceFilter, UpgradeJudge};
use crate::workflow::{
    discover_documents, load_document, rewrite, DocumentWriter, WorkflowDocument, WriteOutcome,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Releases fetched per repository; `Err` carries the failure message
type FetchResults = BTreeMap<String, Result<Vec<ReleaseTag>, String>>;

/// Orchestrator for coordinating an upgrade run
pub struct Orchestrator {
    /// Run configuration
    config: RunConfig,
    /// Source of release tags
    provider: Arc<dyn ReleaseProvider>,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// Upgrade summary with all results
    pub summary: UpdateSummary,
    /// Diagnostics in the order they were raised
    pub diagnostics: Vec<Diagnostic>,
}

impl OrchestratorResult {
    /// Diagnostics at the given level
    pub fn diagnostics_at(&self, level: Level) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.level == level)
    }

    /// Returns true if any error-level diagnostic was raised
    pub fn has_errors(&self) -> bool {
        self.diagnostics_at(Level::Error).next().is_some()
    }
}

/// Errors that abort a run
#[derive(Debug)]
pub enum OrchestratorError {
    /// Failed to create HTTP client
    HttpClientError(String),
    /// Failed to discover workflow files
    Discovery(DiscoveryError),
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::HttpClientError(msg) => write!(f, "HTTP client error: {}", msg),
            OrchestratorError::Discovery(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrchestratorError::Discovery(err) => Some(err),
            OrchestratorError::HttpClientError(_) => None,
        }
    }
}

impl From<DiscoveryError> for OrchestratorError {
    fn from(err: DiscoveryError) -> Self {
        OrchestratorError::Discovery(err)
    }
}

impl Orchestrator {
    /// Create a new orchestrator talking to the GitHub Releases API
    pub fn new(config: RunConfig) -> Result<Self, OrchestratorError> {
        let client = HttpClient::new()
            .map_err(|e| OrchestratorError::HttpClientError(e.to_string()))?
            .with_token(config.github_token.clone());
        let provider = GitHubReleasesAdapter::with_api_url(client, config.api_url.clone());

        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create an orchestrator with a custom release provider
    pub fn with_provider(config: RunConfig, provider: Arc<dyn ReleaseProvider>) -> Self {
        Self { config, provider }
    }

    /// Run the upgrade workflow
    pub async fn run(&self) -> Result<OrchestratorResult, OrchestratorError> {
        let mut progress = Progress::new(self.config.show_progress);
        let mut summary = UpdateSummary::new(self.config.dry_run);
        let mut diagnostics = Vec::new();

        // Step 1: Discover workflow files
        progress.spinner("Discovering workflow files...");
        let paths = discover_documents(&self.config.root, &self.config.patterns);
        progress.finish_and_clear();
        let paths = paths?;

        // Step 2: Load and scan each document
        let mut documents = Vec::with_capacity(paths.len());
        for path in &paths {
            match load_document(path) {
                Ok(document) => {
                    if let Some(message) = &document.parse_error {
                        let err = DocumentError::yaml_parse_error(path, message.clone());
                        report(
                            &mut diagnostics,
                            Diagnostic::warning(DiagnosticKind::DocumentParse, err.to_string())
                                .with_file(self.relative(path)),
                        );
                    }
                    documents.push(document);
                }
                Err(e) => report(
                    &mut diagnostics,
                    Diagnostic::error(DiagnosticKind::DocumentIo, e.to_string())
                        .with_file(self.relative(path)),
                ),
            }
        }

        // Step 3 + 4: Filter references and set aside unsupported tags
        let filter = ReferenceFilter::new()
            .with_prefixes(self.config.prefixes.clone())
            .with_exclude(self.config.exclude.clone());
        let mut candidates = Vec::new();

        for reference in collect_references(&documents) {
            if !filter.matches_prefix(&reference.name) {
                continue;
            }
            if filter.is_excluded(&reference) {
                debug!(reference = %reference, "excluded");
                summary.add_decision(UpdateResult::skip(reference, SkipReason::Excluded));
                continue;
            }
            if parse_tag(&reference.tag).is_none() {
                report(
                    &mut diagnostics,
                    Diagnostic::warning(
                        DiagnosticKind::UnsupportedTag,
                        format!("Skipping {}: unsupported tag format", reference),
                    ),
                );
                summary.add_decision(UpdateResult::skip(
                    reference,
                    SkipReason::UnsupportedTagFormat,
                ));
                continue;
            }
            candidates.push(reference);
        }

        // Step 5: Fetch releases once per distinct repository
        let repositories: BTreeSet<String> = candidates
            .iter()
            .map(|r| r.repository().to_string())
            .collect();
        progress.start(repositories.len() as u64, "Fetching releases");
        let fetched = self.fetch_all(repositories, &progress).await;
        progress.finish_and_clear();

        // Step 6: Judge each reference and build the upgrade set
        let judge = UpgradeJudge::new();
        let mut upgrades = UpgradeSet::new();
        let mut reported_failures = BTreeSet::new();

        for reference in candidates {
            let decision = match fetched.get(reference.repository()) {
                Some(Ok(releases)) => judge.judge(&reference, releases),
                Some(Err(message)) => {
                    if reported_failures.insert(reference.repository().to_string()) {
                        report(
                            &mut diagnostics,
                            Diagnostic::warning(
                                DiagnosticKind::ProviderFetch,
                                format!(
                                    "Failed to fetch releases for {}: {}",
                                    reference.repository(),
                                    message
                                ),
                            ),
                        );
                    }
                    UpdateResult::skip(reference, SkipReason::FetchFailed(message.clone()))
                }
                None => UpdateResult::skip(
                    reference,
                    SkipReason::FetchFailed("no fetch result".to_string()),
                ),
            };

            match &decision {
                UpdateResult::Update {
                    reference, new_tag, ..
                } => {
                    upgrades.insert(reference.clone(), new_tag.clone());
                }
                UpdateResult::Skip {
                    reference,
                    reason: SkipReason::NoCandidates,
                } => report(
                    &mut diagnostics,
                    Diagnostic::warning(
                        DiagnosticKind::NoCandidates,
                        format!("No valid release tags found for {}", reference.name),
                    ),
                ),
                UpdateResult::Skip { reference, reason } => {
                    debug!(reference = %reference, reason = %reason, "skipped");
                }
            }
            summary.add_decision(decision);
        }

        // Step 7: Rewrite and write documents
        if !upgrades.is_empty() && !self.config.dry_run {
            progress.spinner("Writing updates...");
        }
        let writer = DocumentWriter::new(self.config.dry_run);
        for document in documents {
            let mut document_result = DocumentResult::new(self.relative(&document.path));
            document_result.references = document.references.len();
            document_result.parse_error = document.parse_error.clone();

            // Unparseable files are reported and left untouched
            if document.has_parse_error() {
                summary.add_document(document_result);
                continue;
            }

            let result = rewrite(&document.text, &upgrades);
            if result.has_changes() {
                match writer.write_if_changed(&document.path, &document.text, &result.text) {
                    Ok(outcome) => {
                        for change in &result.changes {
                            let new_tag = upgrades
                                .get(&change.reference)
                                .unwrap_or(change.new_tag.as_str());
                            report(
                                &mut diagnostics,
                                Diagnostic::notice(
                                    DiagnosticKind::Upgrade,
                                    format!(
                                        "Updated {} from {} to {}",
                                        change.reference.name, change.reference.tag, new_tag
                                    ),
                                )
                                .with_file(self.relative(&document.path))
                                .with_line(change.line),
                            );
                        }
                        document_result.written = outcome == WriteOutcome::Written;
                        document_result.changes = result.changes;
                    }
                    Err(e) => report(
                        &mut diagnostics,
                        Diagnostic::error(DiagnosticKind::Write, e.to_string())
                            .with_file(self.relative(&document.path)),
                    ),
                }
            }
            summary.add_document(document_result);
        }
        progress.finish_and_clear();

        Ok(OrchestratorResult {
            summary,
            diagnostics,
        })
    }

    /// Path as reported to the user, relative to the root when possible
    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.config.root).unwrap_or(path)
    }

    /// Fetch releases for every repository, at most `concurrency` at a time
    async fn fetch_all(&self, names: BTreeSet<String>, progress: &Progress) -> FetchResults {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();
        let mut results: FetchResults = BTreeMap::new();

        for name in names {
            // Replaced below unless the task is lost
            results.insert(name.clone(), Err("fetch task failed".to_string()));

            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        debug!(name = %name, registry = provider.registry_name(), "fetching releases");
                        provider.fetch_releases(&name).await.map_err(|e| e.to_string())
                    }
                    Err(e) => Err(e.to_string()),
                };
                (name, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            progress.inc();
            match joined {
                Ok((name, outcome)) => {
                    progress.set_message(&name);
                    results.insert(name, outcome);
                }
                Err(e) => warn!("release fetch task failed: {}", e),
            }
        }

        results
    }
}

/// Union of all references across documents, ordered and de-duplicated
fn collect_references(documents: &[WorkflowDocument]) -> BTreeSet<Reference> {
    documents
        .iter()
        .flat_map(|d| d.references.iter().cloned())
        .collect()
}

/// Record a diagnostic for the formatters; stderr only sees it at debug
fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    debug!(level = %diagnostic.level, kind = ?diagnostic.kind, "{}", diagnostic);
    diagnostics.push(diagnostic);
}
