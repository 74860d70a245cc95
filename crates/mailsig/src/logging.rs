//! Diagnostic logging to stderr.
//!
//! stdout carries the HTML, so logs must never go there.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "MAILSIG_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter directive for the given `-v` count. Flags beat the environment.
pub fn directive(verbosity: u8, env: Option<&str>) -> String {
    match verbosity {
        0 => env
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DIRECTIVE)
            .to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let env = std::env::var(LOG_ENV).ok();
    let directive = directive(verbosity, env.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
