//! Logging setup for the server binary.

use sheetproxy_error::ConfigError;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `log_level` when set. With `json` every event is a
/// JSON line; otherwise a human-readable format with targets and source
/// locations is used.
///
/// # Errors
///
/// Returns [`ConfigError`] if `log_level` is not a valid filter or a global
/// subscriber is already installed.
pub fn init_logging(log_level: &str, json: bool) -> Result<(), ConfigError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| ConfigError::new(format!("Invalid log level '{}': {}", log_level, e)))?;

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))
}
