//! actup - GitHub Actions reference updater CLI tool
//!
//! Scans workflow files for `uses: owner/repo@tag` references and rewrites
//! them to the latest stable release tag, keeping the original granularity.

use actup::cli::{CliArgs, RunConfig};
use actup::logging;
use actup::orchestrator::Orchestrator;
use actup::output::{create_formatter, OutputConfig};
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    args.validate()?;
    logging::init(args.verbose, args.quiet);

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        root = %args.path.display(),
        dry_run = args.dry_run,
        "starting actup"
    );

    // Create and run the orchestrator
    let config = RunConfig::from_cli(&args);
    let orchestrator = Orchestrator::new(config)?;
    let result = orchestrator.run().await?;

    // Create output formatter based on CLI options
    let mut output_config = OutputConfig::from_cli(
        args.json,
        args.diff,
        args.github_annotations,
        args.verbose,
        args.quiet,
        args.dry_run,
    );
    output_config.color = io::stdout().is_terminal();
    let formatter = create_formatter(output_config);

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    // Per-item failures are reported as diagnostics, never through the exit code
    Ok(ExitCode::SUCCESS)
}
