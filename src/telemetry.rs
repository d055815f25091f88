//! Tracing subscriber setup for the server binary.

use tracing::Subscriber;
use tracing::subscriber::{SetGlobalDefaultError, set_global_default};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Builds a subscriber that writes formatted events to stdout.
///
/// The filter is read from `RUST_LOG`, falling back to `default_filter`
/// when the variable is unset or invalid.
pub fn get_subscriber(default_filter: &str) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    Registry::default()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
}

/// Installs the subscriber as the global default.
pub fn init_subscriber(
    subscriber: impl Subscriber + Send + Sync,
) -> Result<(), SetGlobalDefaultError> {
    set_global_default(subscriber)
}
