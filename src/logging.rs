//! Diagnostics output for hosts that do not install their own subscriber.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable read for the log filter, e.g. `SHORTCUTS_LOG=debug`.
pub const LOG_ENV: &str = "SHORTCUTS_LOG";

/// Install a stderr subscriber. `default_filter` applies when [`LOG_ENV`]
/// is unset or unparsable.
///
/// Fails if a global subscriber is already installed.
pub fn init(default_filter: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
}
