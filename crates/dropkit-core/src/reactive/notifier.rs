#![forbid(unsafe_code)]

//! Synchronous change notification with RAII subscriptions.
//!
//! # Design
//!
//! [`Notifier<E>`] holds an ordered list of subscriber callbacks in shared,
//! reference-counted storage (`Rc<RefCell<..>>`). [`Notifier::emit`] bumps
//! the version and calls every live subscriber with the event before it
//! returns, so dependent UI state recomputes on the same tick.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each `emit`.
//! 2. Subscribers are notified in registration order.
//! 3. A callback whose [`Subscription`] was dropped is never called again.
//! 4. No internal borrow is held while callbacks run: a subscriber may read
//!    the emitting object, subscribe, or trigger a nested `emit`.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: guards stored indefinitely keep their callbacks
//!   alive. Dead weak references are pruned lazily during `emit()`.
//! - **Unbounded recursion**: a subscriber that unconditionally mutates the
//!   source on every event recurses until the stack overflows.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info_span};
use web_time::Instant;

/// A subscriber callback stored as a strong `Rc` by its guard, handed out
/// as `Weak` to the notifier.
type CallbackRc<E> = Rc<dyn Fn(&E)>;
type CallbackWeak<E> = Weak<dyn Fn(&E)>;

struct NotifierInner<E> {
    version: u64,
    /// Dead entries are pruned on emit.
    subscribers: Vec<CallbackWeak<E>>,
}

/// Fan-out point for change events of type `E`.
///
/// Cloning a `Notifier` creates a new handle to the **same** subscriber
/// list.
pub struct Notifier<E> {
    inner: Rc<RefCell<NotifierInner<E>>>,
}

impl<E> Clone for Notifier<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> std::fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Notifier")
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<E: 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Notifier<E> {
    /// Create a notifier with version 0 and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(NotifierInner {
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Register a callback for every subsequent event.
    ///
    /// Dropping the returned guard unsubscribes the callback.
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: CallbackRc<E> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.inner.borrow_mut().subscribers.push(weak);
        // `Rc<dyn Fn(&E)>` cannot coerce to `Rc<dyn Any>` directly, so box it.
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of events emitted so far. Useful for dirty-checking in render
    /// loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Deliver `event` to every live subscriber, in registration order.
    pub fn emit(&self, event: &E) {
        let callbacks: Vec<CallbackRc<E>> = {
            let mut inner = self.inner.borrow_mut();
            inner.version += 1;
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect()
        };

        if callbacks.is_empty() {
            return;
        }

        let subscribers = callbacks.len() as u64;
        let start = Instant::now();
        let _span = info_span!(
            "dropkit.notify",
            subscribers,
            duration_us = tracing::field::Empty
        )
        .entered();

        for cb in &callbacks {
            cb(event);
        }

        let duration_us = start.elapsed().as_micros() as u64;
        tracing::Span::current().record("duration_us", duration_us);
        debug!(subscribers, duration_us, "change notification delivered");
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` drops the strong `Rc`, so the `Weak` held by
/// the notifier no longer upgrades and the callback is skipped.
#[must_use = "dropping the subscription immediately unsubscribes"]
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    /// Explicitly unsubscribe. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
