//! Tracing bootstrap for embedders and examples.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a JSON-formatted subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; a second initialisation is reported and
/// ignored rather than panicking.
pub fn init() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }
}
