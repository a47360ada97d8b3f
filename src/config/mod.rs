//! Configuration module for Presign Uploadr
//!
//! Handles loading and parsing of YAML configuration files with support for
//! environment variable expansion and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Substitute `${NAME}` and `${NAME:-fallback}` placeholders from the process
/// environment. A placeholder with no variable set and no fallback is left in
/// place, so validation can report it.
pub(crate) fn expand_env_vars(s: &str) -> Result<String, ConfigError> {
    let placeholder = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .map_err(|e| ConfigError::ValidationError(format!("Bad expansion pattern: {}", e)))?;

    let expanded = placeholder.replace_all(s, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1])
            .ok()
            .or_else(|| caps.get(2).map(|fallback| fallback.as_str().to_string()))
            .unwrap_or_else(|| caps[0].to_string())
    });

    Ok(expanded.into_owned())
}

fn is_http_endpoint(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub presign: PresignConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigLoader::load(path)
    }

    /// Load configuration from a file without validating it.
    ///
    /// For callers that patch fields (command line overrides) before calling
    /// [`Config::validate`] themselves.
    pub fn load_unvalidated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigLoader::load_unvalidated(path)
    }

    /// Build a configuration around a presign endpoint, everything else default
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            presign: PresignConfig {
                endpoint: endpoint.into(),
                timeout_seconds: None,
            },
            logging: LoggingConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_endpoint(&self.presign.endpoint) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid presign endpoint '{}': must start with http:// or https://",
                self.presign.endpoint
            )));
        }

        if self.presign.timeout_seconds == Some(0) {
            return Err(ConfigError::ValidationError(
                "Presign timeout must be greater than zero".into(),
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level '{}': must be 'trace', 'debug', 'info', 'warn', or 'error'",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format '{}': must be 'pretty' or 'json'",
                    self.logging.format
                )))
            }
        }

        Ok(())
    }
}

/// Presign endpoint configuration
///
/// # Example
///
/// ```yaml
/// presign:
///   endpoint: "https://${PRESIGN_HOST}/prod/get-presigned-url"
///   timeout_seconds: 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignConfig {
    /// URL receiving `POST {"fileName": ...}`. Must start with http:// or https://
    pub endpoint: String,

    /// Request timeout applied to both HTTP calls. Default: none (client default)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Logging configuration
///
/// `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error. Default: "info"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json". Default: "pretty"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Metrics configuration
///
/// When enabled, the command line front end prints the Prometheus text
/// exposition to stderr once the command finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
        }
    }
}

fn default_metrics_enabled() -> bool {
    false
}
