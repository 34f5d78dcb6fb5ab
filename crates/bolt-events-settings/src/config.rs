//! Configuration management for bolt-events
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform-specific
//! configuration directory.
//!
//! Configuration is organized into sections:
//! - Broker behaviour (off validation, fired-event history)
//! - Logging defaults

use bolt_events_core::{BrokerConfig, OffValidation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Directory name under the platform config directory
const APP_DIR: &str = "bolt-events";

/// Default configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Log levels accepted in `logging.level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Broker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerSettings {
    /// Validation applied by `off`
    pub off_validation: OffValidation,
    /// Keep a history of fired events
    pub enable_history: bool,
    /// Maximum number of events kept in history
    pub max_history_size: usize,
    /// Age after which history entries are dropped, in seconds
    pub history_retention_secs: u64,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        let defaults = BrokerConfig::default();
        Self {
            off_validation: defaults.off_validation,
            enable_history: defaults.enable_history,
            max_history_size: defaults.max_history_size,
            history_retention_secs: defaults.history_retention.as_secs(),
        }
    }
}

impl BrokerSettings {
    /// Build the core broker configuration from these settings
    pub fn to_broker_config(&self) -> BrokerConfig {
        BrokerConfig {
            off_validation: self.off_validation,
            enable_history: self.enable_history,
            max_history_size: self.max_history_size,
            history_retention: Duration::from_secs(self.history_retention_secs),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// File format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string()).into()),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Broker behaviour
    pub broker: BrokerSettings,
    /// Logging defaults
    pub logging: LoggingSettings,
}

impl Config {
    /// Default configuration file location
    ///
    /// `<config dir>/bolt-events/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::UnsupportedPlatform)?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => self.to_toml_string()?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.broker.enable_history && self.broker.max_history_size == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "broker.max_history_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if self.broker.enable_history && self.broker.history_retention_secs == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "broker.history_retention_secs".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValueOutOfRange {
                key: "logging.level".to_string(),
                value: self.logging.level.clone(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.broker.off_validation, OffValidation::Grammar);
        assert!(!config.broker.enable_history);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_to_broker_config() {
        let settings = BrokerSettings {
            off_validation: OffValidation::NonEmpty,
            enable_history: true,
            max_history_size: 10,
            history_retention_secs: 60,
        };
        let config = settings.to_broker_config();
        assert_eq!(config.off_validation, OffValidation::NonEmpty);
        assert!(config.enable_history);
        assert_eq!(config.max_history_size, 10);
        assert_eq!(config.history_retention, Duration::from_secs(60));
    }

    #[test]
    fn test_toml_save_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.broker.enable_history = true;
        config.broker.off_validation = OffValidation::NonEmpty;
        config.logging.level = "debug".to_string();
        config.save_to_file(&path).expect("save");

        let loaded = Config::load_from_file(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_save_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");

        let config = Config::default();
        config.save_to_file(&path).expect("save");
        assert_eq!(Config::load_from_file(&path).expect("load"), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[broker]\noff_validation = \"non_empty\"\n").expect("write");

        let loaded = Config::load_from_file(&path).expect("load");
        assert_eq!(loaded.broker.off_validation, OffValidation::NonEmpty);
        assert_eq!(loaded.broker.max_history_size, 1000);
        assert_eq!(loaded.logging, LoggingSettings::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        let result = Config::default().save_to_file(&path);
        assert!(matches!(
            result,
            Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.broker.enable_history = true;
        config.broker.max_history_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().expect("tempdir");
        let config = Config::load_or_default(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[broker\n").expect("write");
        assert!(matches!(
            Config::load_from_file(&path),
            Err(SettingsError::TomlError(_))
        ));
    }
}
