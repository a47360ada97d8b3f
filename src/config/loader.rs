//! Configuration loader with environment variable expansion

use super::{expand_env_vars, Config, ConfigError};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    /// Load configuration from a file, expanding and parsing only
    pub fn load_unvalidated<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_unvalidated(&content)
    }

    /// Parse configuration from YAML text, expanding `${VAR}` placeholders first
    pub fn parse_str(content: &str) -> Result<Config, ConfigError> {
        let config = Self::parse_unvalidated(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Expand placeholders and deserialize, leaving validation to the caller
    pub fn parse_unvalidated(content: &str) -> Result<Config, ConfigError> {
        let expanded = expand_env_vars(content)?;
        Ok(serde_yaml::from_str(&expanded)?)
    }
}
