//! Diagnostics on standard error via `tracing`.

use tracing_subscriber::EnvFilter;

/// Variable holding an `EnvFilter` directive, e.g. `debug` or `infer=trace`.
pub const LOG_ENV: &str = "INFER_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Standard output stays reserved for the
/// reply.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
