//! Configuration management for finsight
//!
//! This module handles loading, validation, and management of
//! finsight configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the data directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Account table file name
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,
    /// Use the embedded default table instead of the data file
    #[serde(default = "default_true")]
    pub use_embedded: bool,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_accounts_file() -> String {
    "pl_accounts.csv".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            accounts_file: default_accounts_file(),
            use_embedded: true,
        }
    }
}

/// Report display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Expand every node by default
    #[serde(default = "default_true")]
    pub expand_all: bool,
    /// Indentation per tree level, in pixels
    #[serde(default = "default_indent_px")]
    pub indent_px: usize,
    /// Deepest ancestor level recorded in the source table
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            expand_all: true,
            indent_px: default_indent_px(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_indent_px() -> usize {
    24
}

fn default_max_depth() -> usize {
    8
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Report display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::FileNotFound { path: path.to_string_lossy().to_string() })?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.display.indent_px == 0 {
            return Err(ConfigError::InvalidValue {
                field: "display.indent_px".to_string(),
                reason: "Indentation must be greater than 0".to_string(),
            });
        }

        if self.display.max_depth < 1 || self.display.max_depth > 8 {
            return Err(ConfigError::InvalidValue {
                field: "display.max_depth".to_string(),
                reason: "Max depth must be between 1 and 8".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the account table file
    pub fn accounts_path(&self) -> PathBuf {
        self.data.path.join(&self.data.accounts_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8082);
        assert!(config.data.use_embedded);
        assert!(config.display.expand_all);
        assert_eq!(config.display.indent_px, 24);
        assert_eq!(config.display.max_depth, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = serde_yaml::from_str(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("server:\n  port: 9090\n").unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data.accounts_file, "pl_accounts.csv");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.display.max_depth = 9;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.indent_px = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_accounts_path() {
        let config = Config::default();
        assert_eq!(config.accounts_path(), PathBuf::from("./data").join("pl_accounts.csv"));
    }
}
