//! Event broker implementation.
//!
//! Provides the EventBroker struct: the validating front of a
//! [`Delegate`]. Only well-formed event names ever reach the delegate.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::time::Instant;

use super::config::BrokerConfig;
use crate::delegate::{Delegate, Emitter, Handler};
use crate::event_name::{parse, EventRecord};

/// What a handler receives when its event fires
#[derive(Debug, Clone, PartialEq)]
pub struct Event<P = Value> {
    /// Parsed event name.
    pub record: EventRecord,
    /// Parameter passed to `fire`, if any.
    pub parameter: Option<P>,
}

impl<P> Event<P> {
    /// Literal event name the event was fired under
    pub fn name(&self) -> String {
        self.record.to_string()
    }

    /// Parameter passed to `fire`, if any
    pub fn parameter(&self) -> Option<&P> {
        self.parameter.as_ref()
    }
}

/// Handler type accepted by [`EventBroker`]
pub type EventHandler<P = Value> = Handler<Event<P>>;

/// Fired event with timestamp for history
#[derive(Debug, Clone)]
struct TimestampedEvent {
    record: EventRecord,
    timestamp: Instant,
}

/// Validating event broker
///
/// `P` is the payload type passed along with fired events; it defaults to
/// `serde_json::Value` for untyped payloads. `D` is the publish/subscribe
/// delegate that holds the registrations.
///
/// Every operation taking an event name silently does nothing when the
/// name is malformed.
pub struct EventBroker<P = Value, D = Emitter<Event<P>>> {
    /// Registration table and dispatch
    delegate: D,
    /// Fired event history (optional)
    history: Mutex<VecDeque<TimestampedEvent>>,
    /// Configuration
    config: BrokerConfig,
    _payload: PhantomData<fn(P)>,
}

impl<P> EventBroker<P> {
    /// Create a new broker with default configuration
    pub fn new() -> Self {
        Self::with_config(BrokerConfig::default())
    }

    /// Create a new broker with custom configuration
    pub fn with_config(config: BrokerConfig) -> Self {
        Self::with_delegate(Emitter::new(), config)
    }
}

impl<P, D> EventBroker<P, D>
where
    D: Delegate<Event<P>>,
{
    /// Create a broker in front of a custom delegate
    pub fn with_delegate(delegate: D, config: BrokerConfig) -> Self {
        Self {
            delegate,
            history: Mutex::new(VecDeque::new()),
            config,
            _payload: PhantomData,
        }
    }

    /// Fire an event
    ///
    /// Every handler registered for exactly `event_type` runs on the
    /// calling thread, in registration order, before this returns.
    pub fn fire(&self, event_type: impl AsRef<str>, parameter: Option<P>) {
        let event_type = event_type.as_ref();
        let Some(record) = parse(event_type) else {
            tracing::trace!("Ignoring fire of malformed event name {:?}", event_type);
            return;
        };

        if self.config.enable_history {
            self.add_to_history(&record);
        }

        let event = Event { record, parameter };
        self.delegate.dispatch(event_type, &event);
    }

    /// Attach an event handler
    ///
    /// The broker keeps a clone of `handler`; pass the same value to
    /// [`off`](Self::off) to remove it.
    pub fn on(&self, event_type: impl AsRef<str>, handler: &EventHandler<P>) {
        let event_type = event_type.as_ref();
        if parse(event_type).is_none() {
            tracing::trace!("Ignoring handler for malformed event name {:?}", event_type);
            return;
        }
        self.delegate.register(event_type, handler.clone());
    }

    /// Attach a handler that is removed after its first invocation
    pub fn one(&self, event_type: impl AsRef<str>, handler: &EventHandler<P>) {
        let event_type = event_type.as_ref();
        if parse(event_type).is_none() {
            tracing::trace!(
                "Ignoring one-time handler for malformed event name {:?}",
                event_type
            );
            return;
        }
        self.delegate.register_once(event_type, handler.clone());
    }

    /// Remove an event handler
    ///
    /// Removing a handler that is not registered is a no-op. The name is
    /// checked according to [`BrokerConfig::off_validation`].
    pub fn off(&self, event_type: impl AsRef<str>, handler: &EventHandler<P>) {
        let event_type = event_type.as_ref();
        if !self.config.off_validation.accepts(event_type) {
            tracing::trace!("Ignoring off for rejected event name {:?}", event_type);
            return;
        }
        self.delegate.deregister(event_type, handler);
    }

    /// Number of handlers registered for `event_type`
    pub fn listener_count(&self, event_type: impl AsRef<str>) -> usize {
        let event_type = event_type.as_ref();
        if parse(event_type).is_none() {
            return 0;
        }
        self.delegate.listener_count(event_type)
    }

    /// Check whether any handler is registered for `event_type`
    pub fn has_listeners(&self, event_type: impl AsRef<str>) -> bool {
        self.listener_count(event_type) > 0
    }

    /// Get recent fired events (if history is enabled)
    ///
    /// Returns events since the given instant, or all history if None.
    pub fn history(&self, since: Option<Instant>) -> Vec<EventRecord> {
        if !self.config.enable_history {
            return Vec::new();
        }

        let history = self.history.lock();
        match since {
            Some(since) => history
                .iter()
                .filter(|e| e.timestamp >= since)
                .map(|e| e.record.clone())
                .collect(),
            None => history.iter().map(|e| e.record.clone()).collect(),
        }
    }

    /// Clear event history
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Get the current configuration
    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    /// Get the underlying delegate
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Add an event to history, maintaining size and age limits
    fn add_to_history(&self, record: &EventRecord) {
        let mut history = self.history.lock();
        let now = Instant::now();

        history.push_back(TimestampedEvent {
            record: record.clone(),
            timestamp: now,
        });

        let retention = self.config.history_retention;
        while history
            .front()
            .is_some_and(|e| now.duration_since(e.timestamp) > retention)
        {
            history.pop_front();
        }

        while history.len() > self.config.max_history_size {
            history.pop_front();
        }
    }
}

impl<P> Default for EventBroker<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, D> std::fmt::Debug for EventBroker<P, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBroker")
            .field("config", &self.config)
            .field("history", &self.history.lock().len())
            .finish()
    }
}
