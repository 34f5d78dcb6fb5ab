//! Shared handler references.

use std::sync::Arc;

/// A registered callback
///
/// Cloning is cheap and yields the *same* handler: registrations and
/// removals compare handlers by identity, never by behaviour. Two
/// handlers built from identical closures are different handlers.
pub struct Handler<A> {
    inner: Arc<dyn Fn(&A) + Send + Sync>,
}

impl<A> Handler<A> {
    /// Wrap a closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invoke the handler
    pub fn call(&self, arg: &A) {
        (self.inner)(arg)
    }

    /// Check whether both values refer to the same registered closure
    pub fn same(&self, other: &Handler<A>) -> bool {
        // Compare data pointers only; vtable pointers are not unique.
        std::ptr::eq(
            Arc::as_ptr(&self.inner) as *const (),
            Arc::as_ptr(&other.inner) as *const (),
        )
    }
}

impl<A> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> PartialEq for Handler<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<A> Eq for Handler<A> {}

impl<A> std::fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.inner) as *const ())
    }
}
