//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout stays reserved for the selected output format.
//! `ACTUP_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter directive
pub const LOG_ENV: &str = "ACTUP_LOG";

/// Filter directive for the given verbosity flags
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "warn,actup=debug"
    } else {
        "warn"
    }
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
