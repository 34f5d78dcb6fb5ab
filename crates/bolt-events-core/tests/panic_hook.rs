//! Runs in its own test binary: the panic hook is process-wide.

use bolt_events_core::{Event, EventBroker, Handler};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_handler_panic_reaches_host_hook_and_dispatch_continues() {
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let hook_calls_clone = hook_calls.clone();
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |_| {
        hook_calls_clone.fetch_add(1, Ordering::SeqCst);
    }));

    let broker: EventBroker = EventBroker::new();
    let after = Arc::new(AtomicUsize::new(0));
    let after_clone = after.clone();
    let panicking = Handler::new(|_: &Event| panic!("handler failed"));
    let counting = Handler::new(move |_: &Event| {
        after_clone.fetch_add(1, Ordering::SeqCst);
    });

    broker.on("bolt>file>save>done", &panicking);
    broker.on("bolt>file>save>done", &counting);
    broker.fire("bolt>file>save>done", None);

    std::panic::set_hook(previous);

    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
    assert_eq!(after.load(Ordering::SeqCst), 1);
}
