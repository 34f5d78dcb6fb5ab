//! # Delegate
//!
//! The publish/subscribe primitive the broker forwards to once an event
//! name has been validated. The delegate knows nothing about the event
//! name grammar: it keys handlers by the literal name string.
//!
//! [`Emitter`] is the in-process implementation used by default.

mod emitter;
mod handler;

pub use emitter::*;
pub use handler::*;

/// Publish/subscribe primitive keyed by literal event name
///
/// Implementations must invoke handlers synchronously, in registration
/// order, and keep dispatching when a handler panics.
///
/// Catching a panic does not silence it: the process panic hook runs
/// before the unwind is caught, so with the default hook every handler
/// panic is still printed to stderr. Hosts that want handler panics
/// reported only through the `warn` log install their own hook with
/// [`std::panic::set_hook`].
pub trait Delegate<A>: Send + Sync {
    /// Register `handler` for every future dispatch of `name`
    fn register(&self, name: &str, handler: Handler<A>);

    /// Register `handler` for the next dispatch of `name` only
    fn register_once(&self, name: &str, handler: Handler<A>);

    /// Remove every registration of `handler` for `name`
    ///
    /// Returns true if at least one registration was removed.
    fn deregister(&self, name: &str, handler: &Handler<A>) -> bool;

    /// Invoke the handlers registered for `name` with `arg`
    ///
    /// Returns the number of handlers invoked.
    fn dispatch(&self, name: &str, arg: &A) -> usize;

    /// Number of handlers currently registered for `name`
    fn listener_count(&self, name: &str) -> usize;
}
