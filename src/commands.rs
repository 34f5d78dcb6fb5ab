//! Implementations behind the `bolt-events` subcommands.
//!
//! Each function returns the text to print so the binary stays a thin
//! argument-parsing shell.

use bolt_events_core::{Event, EventBroker, EventRecord, Handler, KnownEvent};
use bolt_events_settings::Config;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load the configuration the binary runs with
///
/// An explicit path is always used. Without one the platform default is
/// tried; when the platform has no configuration directory the built-in
/// defaults apply and no path is returned.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<(Option<PathBuf>, Config)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match Config::default_path() {
            Ok(path) => path,
            Err(_) => return Ok((None, Config::default())),
        },
    };
    let config = Config::load_or_default(&path)?;
    Ok((Some(path), config))
}

/// Outcome of `check`
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// One line per checked name.
    pub lines: Vec<String>,
    /// Number of names that did not parse.
    pub invalid: usize,
}

/// Parse each name, reporting its record or the reason it was rejected
pub fn check(names: &[String]) -> CheckReport {
    let mut lines = Vec::with_capacity(names.len());
    let mut invalid = 0;

    for name in names {
        match name.parse::<EventRecord>() {
            Ok(record) => {
                let known = name.parse::<KnownEvent>().ok();
                lines.push(
                    json!({
                        "name": name,
                        "record": record,
                        "known": known.map(|k| k.description()),
                    })
                    .to_string(),
                );
            }
            Err(err) => {
                invalid += 1;
                lines.push(json!({ "name": name, "error": err.to_string() }).to_string());
            }
        }
    }

    CheckReport { lines, invalid }
}

/// List the catalogued admin events
pub fn events() -> Vec<String> {
    let width = KnownEvent::ALL
        .iter()
        .map(|known| known.as_str().len())
        .max()
        .unwrap_or(0);

    KnownEvent::ALL
        .iter()
        .map(|known| format!("{:width$}  {}", known.as_str(), known.description()))
        .collect()
}

/// Outcome of `fire`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireReport {
    /// Events the recording handler observed, rendered as JSON.
    pub received: Vec<String>,
    /// Names in the broker's history after firing (empty unless enabled).
    pub history: Vec<String>,
}

/// Fire each name, in order, on one broker built from `config`
///
/// A recording handler is attached around every fire. Malformed names
/// leave no trace in either list.
pub fn fire(config: &Config, names: &[String], parameter: Option<Value>) -> FireReport {
    let broker: EventBroker = EventBroker::with_config(config.broker.to_broker_config());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_clone = seen.clone();
    let handler = Handler::new(move |event: &Event| {
        seen_clone.lock().push(
            json!({
                "name": event.name(),
                "record": event.record,
                "parameter": event.parameter(),
            })
            .to_string(),
        );
    });

    for name in names {
        broker.on(name, &handler);
        broker.fire(name, parameter.clone());
        broker.off(name, &handler);
    }

    let received = std::mem::take(&mut *seen.lock());
    FireReport {
        received,
        history: broker
            .history(None)
            .iter()
            .map(EventRecord::to_string)
            .collect(),
    }
}

/// Render the effective configuration as TOML
pub fn show_config(config: &Config) -> anyhow::Result<String> {
    Ok(config.to_toml_string()?)
}
