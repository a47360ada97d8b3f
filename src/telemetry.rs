//! Tracing subscriber setup
//!
//! Installs a registry with two layers:
//! - **EnvFilter**: `RUST_LOG` when set, otherwise the configured level
//! - **Fmt layer**: human-readable or JSON output on stderr

use crate::config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Subscriber initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    FilterError(String),

    #[error("Failed to set global subscriber (may already be initialized): {0}")]
    SubscriberError(String),
}

/// Build the filter: `RUST_LOG` wins over the configured level
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(config.level.to_lowercase())
            .map_err(|e| TelemetryError::FilterError(e.to_string())),
    }
}

/// Initialize the global tracing subscriber
///
/// # Example
///
/// ```no_run
/// use presign_uploadr::config::LoggingConfig;
/// use presign_uploadr::telemetry::init_subscriber;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// init_subscriber(&LoggingConfig::default())?;
/// tracing::info!("ready");
/// # Ok(())
/// # }
/// ```
pub fn init_subscriber(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let result = if config.format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer);

        tracing::subscriber::set_global_default(subscriber)
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer);

        tracing::subscriber::set_global_default(subscriber)
    };

    result.map_err(|e| TelemetryError::SubscriberError(e.to_string()))
}
