//! CLI argument parsing module for actup

use crate::error::ConfigError;
use crate::registry::DEFAULT_API_URL;
use crate::workflow::DEFAULT_PATTERNS;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Default number of concurrent release fetches
pub const DEFAULT_CONCURRENCY: usize = 4;

/// GitHub Actions reference updater
#[derive(Parser, Debug, Clone)]
#[command(
    name = "actup",
    version,
    about = "Update `uses: owner/repo@tag` references in GitHub workflow files"
)]
pub struct CliArgs {
    /// Repository root (default: $GITHUB_WORKSPACE or current directory)
    #[arg(env = "GITHUB_WORKSPACE", default_value = ".")]
    pub path: PathBuf,

    /// Workflow file glob relative to the root (can be specified multiple times)
    #[arg(
        long = "file-glob",
        value_name = "GLOB",
        action = ArgAction::Append,
        default_values_t = DEFAULT_PATTERNS.iter().map(|p| p.to_string())
    )]
    pub file_globs: Vec<String>,

    /// Comma separated name prefixes to update
    #[arg(long, value_name = "LIST", value_delimiter = ',', default_value = "actions")]
    pub prefixes: Vec<String>,

    /// Exclude specific actions from update (can be specified multiple times)
    #[arg(long, value_name = "NAME", action = ArgAction::Append)]
    pub exclude: Vec<String>,

    // General options
    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,

    /// Emit GitHub workflow commands (::notice::, ::warning::)
    #[arg(long)]
    pub github_annotations: bool,

    // Network options
    /// Maximum number of concurrent release fetches
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl CliArgs {
    /// Reject option values clap cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: self.concurrency,
            });
        }
        if self.file_globs.iter().any(|g| g.trim().is_empty()) {
            return Err(ConfigError::EmptyPattern);
        }
        if self.effective_prefixes().is_empty() {
            return Err(ConfigError::EmptyPrefixes);
        }
        Ok(())
    }

    /// Prefixes with blanks removed
    pub fn effective_prefixes(&self) -> Vec<String> {
        self.prefixes
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Plain run configuration consumed by the orchestrator
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Repository root
    pub root: PathBuf,
    /// Workflow file globs relative to the root
    pub patterns: Vec<String>,
    /// Name prefixes to include (empty matches nothing)
    pub prefixes: Vec<String>,
    /// Names to never upgrade
    pub exclude: Vec<String>,
    /// Report without writing
    pub dry_run: bool,
    /// Maximum concurrent release fetches
    pub concurrency: usize,
    /// GitHub API token
    pub github_token: Option<String>,
    /// GitHub API base URL
    pub api_url: String,
    /// Whether to draw progress on stderr
    pub show_progress: bool,
}

impl RunConfig {
    /// Create a configuration for `root` with default settings
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            prefixes: vec!["actions".to_string()],
            exclude: Vec::new(),
            dry_run: false,
            concurrency: DEFAULT_CONCURRENCY,
            github_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            show_progress: false,
        }
    }

    /// Build the configuration from parsed CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            root: args.path.clone(),
            patterns: args.file_globs.clone(),
            prefixes: args.effective_prefixes(),
            exclude: args.exclude.clone(),
            dry_run: args.dry_run,
            concurrency: args.concurrency,
            github_token: args.github_token.clone(),
            api_url: args.api_url.clone(),
            show_progress: !args.quiet && !args.json && !args.github_annotations,
        }
    }

    /// Set name prefixes
    pub fn with_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Set excluded names
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set workflow file globs
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the fetch concurrency
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}
