//! In-process emitter.
//!
//! Keeps an ordered handler list per literal event name. Dispatch
//! snapshots the list and releases the lock before invoking handlers,
//! so handlers may register, remove or fire events themselves.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use uuid::Uuid;

use super::{Delegate, Handler};

/// Identifier of a single registration, used in log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

struct Registration<A> {
    id: SubscriptionId,
    handler: Handler<A>,
    once: bool,
}

impl<A> Clone for Registration<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: self.handler.clone(),
            once: self.once,
        }
    }
}

/// Default [`Delegate`] implementation
pub struct Emitter<A> {
    handlers: Mutex<HashMap<String, Vec<Registration<A>>>>,
}

impl<A> Emitter<A> {
    /// Create an emitter with no registrations
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Number of event names with at least one registration
    pub fn event_count(&self) -> usize {
        self.handlers.lock().len()
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.handlers.lock().clear();
    }

    fn insert(&self, name: &str, handler: Handler<A>, once: bool) {
        let id = SubscriptionId::new();
        self.handlers
            .lock()
            .entry(name.to_string())
            .or_default()
            .push(Registration { id, handler, once });
        tracing::debug!("Subscription {} added for {} (once: {})", id, name, once);
    }

    /// Take the current handler list for `name`, removing one-shot entries
    fn snapshot(&self, name: &str) -> Vec<Registration<A>> {
        let mut handlers = self.handlers.lock();
        let Some(list) = handlers.get_mut(name) else {
            return Vec::new();
        };

        let snapshot = list.clone();
        list.retain(|registration| !registration.once);
        if list.is_empty() {
            handlers.remove(name);
        }
        snapshot
    }
}

impl<A> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("events", &self.event_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

impl<A> Delegate<A> for Emitter<A> {
    fn register(&self, name: &str, handler: Handler<A>) {
        self.insert(name, handler, false);
    }

    fn register_once(&self, name: &str, handler: Handler<A>) {
        self.insert(name, handler, true);
    }

    fn deregister(&self, name: &str, handler: &Handler<A>) -> bool {
        let mut handlers = self.handlers.lock();
        let Some(list) = handlers.get_mut(name) else {
            return false;
        };

        let before = list.len();
        list.retain(|registration| {
            let matched = registration.handler.same(handler);
            if matched {
                tracing::debug!("Subscription {} removed from {}", registration.id, name);
            }
            !matched
        });
        let removed = list.len() != before;

        if list.is_empty() {
            handlers.remove(name);
        }
        removed
    }

    /// A panicking handler is logged at `warn` and skipped. The panic
    /// hook has already run by then (see [`Delegate`]).
    fn dispatch(&self, name: &str, arg: &A) -> usize {
        let snapshot = self.snapshot(name);

        for registration in &snapshot {
            let result = catch_unwind(AssertUnwindSafe(|| registration.handler.call(arg)));
            if let Err(payload) = result {
                tracing::warn!(
                    "Handler {} for {} panicked: {}",
                    registration.id,
                    name,
                    panic_message(payload.as_ref())
                );
            }
        }

        tracing::trace!("Dispatched {} to {} handler(s)", name, snapshot.len());
        snapshot.len()
    }

    fn listener_count(&self, name: &str) -> usize {
        self.handlers.lock().get(name).map_or(0, Vec::len)
    }
}
