//! Broker configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How `off` validates the event name it is given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffValidation {
    /// Same grammar check as `on`, `one` and `fire`.
    #[default]
    Grammar,
    /// Any non-empty name is forwarded to the delegate.
    NonEmpty,
}

impl OffValidation {
    /// Check whether `off` should forward `event_type`
    pub fn accepts(&self, event_type: &str) -> bool {
        match self {
            OffValidation::Grammar => crate::event_name::is_valid(event_type),
            OffValidation::NonEmpty => !event_type.is_empty(),
        }
    }
}

impl std::fmt::Display for OffValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffValidation::Grammar => write!(f, "grammar"),
            OffValidation::NonEmpty => write!(f, "non_empty"),
        }
    }
}

/// Configuration for the event broker
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerConfig {
    /// Validation applied by `off`.
    pub off_validation: OffValidation,
    /// Whether to keep a history of fired events.
    pub enable_history: bool,
    /// Maximum number of events to retain in history.
    pub max_history_size: usize,
    /// How long to retain events in history.
    pub history_retention: Duration,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            off_validation: OffValidation::Grammar,
            enable_history: false,
            max_history_size: 1000,
            history_retention: Duration::from_secs(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_validation_accepts() {
        assert!(OffValidation::Grammar.accepts("a>b"));
        assert!(!OffValidation::Grammar.accepts("a b"));
        assert!(!OffValidation::Grammar.accepts(""));

        assert!(OffValidation::NonEmpty.accepts("a b"));
        assert!(!OffValidation::NonEmpty.accepts(""));
    }

    #[test]
    fn test_off_validation_serde() {
        let json = serde_json::to_string(&OffValidation::NonEmpty).expect("serialize");
        assert_eq!(json, "\"non_empty\"");
        assert_eq!(OffValidation::NonEmpty.to_string(), "non_empty");
    }
}
