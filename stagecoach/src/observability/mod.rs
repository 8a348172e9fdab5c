//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

/// Installs a global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. With `json`
/// set, log lines are emitted as JSON objects. Calling this more than
/// once is harmless; later calls leave the existing subscriber in place.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    }
}
