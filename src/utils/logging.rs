//! Logging initialization.
//!
//! Everything goes to stderr: stdout is read back by the line editor and must
//! only ever carry completion output.
//!
//! The level comes from `RUST_LOG` (default `warn`), or `debug` when the CLI is
//! run with `--verbose`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber. Safe to call more than once; later calls are
/// ignored.
pub fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .without_time();

    if tracing_subscriber::registry().with(env_filter).with(stderr_layer).try_init().is_err() {
        return;
    }

    tracing::debug!(verbose, "Logging initialized");
}
