//! Tracing initialisation.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a JSON subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// Stdout is left to the event stream.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();
}
