//! `tracing` setup shared by both binaries.
//!
//! Everything goes to stderr. The extractor's stdout is read by the publisher,
//! so it must carry nothing but the metadata lines.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. The filter comes from `RUST_LOG` and
/// defaults to `info`. Calling this more than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
