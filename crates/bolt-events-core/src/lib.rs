//! # bolt-events core
//!
//! Namespaced event broker for the Bolt admin interface.
//! Provides the event name grammar and parser, the publish/subscribe
//! delegate with its default in-process emitter, and the validating
//! broker that sits in front of it.

pub mod broker;
pub mod delegate;
pub mod error;
pub mod event_name;

pub use broker::{BrokerConfig, Event, EventBroker, EventHandler, OffValidation};
pub use delegate::{Delegate, Emitter, Handler, SubscriptionId};
pub use error::{Error, EventNameError, Result};
pub use event_name::{is_valid, parse, EventRecord, KnownEvent};
