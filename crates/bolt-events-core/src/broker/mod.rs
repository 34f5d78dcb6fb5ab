//! # Event Broker Module
//!
//! Mediates every registration and dispatch so that only syntactically
//! valid event names reach the publish/subscribe delegate.
//!
//! ## Overview
//!
//! - Producers call `fire`; consumers call `on`, `one` and `off`
//! - Malformed event names are ignored without error or panic
//! - Dispatch is synchronous and follows registration order
//! - Matching is on the full literal name, never on a prefix
//!
//! ## Usage
//!
//! ```rust
//! use bolt_events_core::broker::{Event, EventBroker};
//! use bolt_events_core::delegate::Handler;
//! use serde_json::json;
//!
//! let broker: EventBroker = EventBroker::new();
//!
//! let handler = Handler::new(|event: &Event| {
//!     println!("{} fired with {:?}", event.name(), event.parameter());
//! });
//! broker.on("bolt>content>save>done", &handler);
//!
//! broker.fire("bolt>content>save>done", Some(json!({ "id": 1 })));
//!
//! // Silently ignored
//! broker.fire("not a valid event!!", None);
//!
//! broker.off("bolt>content>save>done", &handler);
//! ```

mod config;
mod event_broker;

pub use config::*;
pub use event_broker::*;
