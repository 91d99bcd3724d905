//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a binary.
///
/// Cargo binary names use hyphens while tracing targets use the crate's
/// underscore form, so `parley-server` becomes `parley_server=debug`.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    let target = bin_name.replace('-', "_");
    format!("{target}={level},tower_http={level}")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when it is set.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, default_level)));

    // try_init: a second call (e.g. from tests) must not panic
    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
    {
        tracing::debug!(bin = bin_name, "Logger initialized");
    }
}
