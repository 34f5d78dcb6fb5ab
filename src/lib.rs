//! # bolt-events
//!
//! Namespaced event broker for the Bolt admin interface.
//!
//! ## Architecture
//!
//! bolt-events is organized as a workspace with multiple crates:
//!
//! 1. **bolt-events-core** - Event name grammar, delegate emitter, broker
//! 2. **bolt-events-settings** - Configuration file handling
//! 3. **bolt-events** - Logging setup and the `bolt-events` command-line tool

pub mod commands;

pub use bolt_events_core::{
    broker, delegate, error, event_name, is_valid, parse, BrokerConfig, Delegate, Emitter, Error,
    Event, EventBroker, EventHandler, EventNameError, EventRecord, Handler, KnownEvent,
    OffValidation, Result, SubscriptionId,
};
pub use bolt_events_settings::{BrokerSettings, Config, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr with:
/// - RUST_LOG environment variable support, falling back to `settings.level`
/// - Human-readable or JSON lines output
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    if settings.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
