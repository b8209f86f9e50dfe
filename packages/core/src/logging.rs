//! Tracing setup for binaries and tests embedding the converter
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the host. `init_tracing` is the usual one-liner for hosts that do not
//! have their own.

use tracing_subscriber::EnvFilter;

/// Install a formatted subscriber filtered by `RUST_LOG`
///
/// Falls back to `default_directive` (e.g. `"info"` or
/// `"blocktree_core=debug"`) when `RUST_LOG` is unset or invalid. Returns
/// `false` when a global subscriber was already installed, so calling this more
/// than once is harmless.
pub fn init_tracing(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_target(true)
        .try_init()
        .is_ok()
}
