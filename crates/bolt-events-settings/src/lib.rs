//! bolt-events Settings Crate
//!
//! Loads, validates and saves the broker configuration file.

pub mod config;
pub mod error;

pub use config::{BrokerSettings, Config, LoggingSettings};
pub use error::{ConfigError, SettingsError};
