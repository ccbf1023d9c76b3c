//! # Telemetry Bootstrap
//!
//! tracing subscriber setup for embedding applications.
//!
//! The service itself only emits `tracing` events; installing a
//! subscriber is the embedder's call. This helper wires the common
//! case: fmt output filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset. Safe to call more than
/// once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
