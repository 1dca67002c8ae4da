//! Logging init: structured `tracing` output on stderr.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset. The console report on stdout is
/// the primary output, so only warnings and errors are logged by default.
const DEFAULT_FILTER: &str = "warn";

/// Installs the global fmt subscriber writing to stderr.
///
/// `RUST_LOG` overrides the filter, e.g. `RUST_LOG=farmsheets_cli=debug`.
/// Calling this twice is harmless; the second call leaves the first subscriber
/// in place.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
