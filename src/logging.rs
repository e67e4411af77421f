//! Tracing subscriber setup for binaries.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` when set, else `default_directive` (e.g. "wal=info").
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    // A second call (tests, embedding apps) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
