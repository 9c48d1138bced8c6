#![forbid(unsafe_code)]

//! Observable value with ordered change notification.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Every [`Observable::publish`] stores the value and
//! notifies all live subscribers in registration order, even when the value
//! is unchanged, so each publish is delivered at least once.
//!
//! Late subscribers see nothing from the past; callers that want the current
//! value read it with [`Observable::get`] (the theme context does this for
//! its own subscribers).
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: If `Subscription` guards are stored indefinitely
//!   callbacks accumulate. Dead weak references are pruned lazily during
//!   notification.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::debug_span;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
    /// Values published but not yet delivered.
    pending: VecDeque<T>,
    /// Set while a drain loop is delivering.
    notifying: bool,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** state.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each publish.
/// 2. Subscribers are notified in registration order.
/// 3. Publishes are delivered in call order, including publishes made from
///    inside a subscriber callback.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Store `value`, bump the version, and notify every live subscriber.
    ///
    /// A publish made from inside a callback is queued and delivered after
    /// the current value has reached every subscriber.
    pub fn publish(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            inner.version += 1;
            inner.pending.push_back(value);
            if inner.notifying {
                return;
            }
            inner.notifying = true;
        }
        self.drain();
    }

    /// Register `callback` for future publishes.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.inner.borrow_mut().subscribers.push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn drain(&self) {
        let _guard = DrainGuard { inner: &self.inner };
        loop {
            // Collect first so callbacks can publish without a borrow conflict.
            let (value, callbacks) = {
                let mut inner = self.inner.borrow_mut();
                let Some(value) = inner.pending.pop_front() else {
                    return;
                };
                inner.subscribers.retain(|w| w.strong_count() > 0);
                let callbacks: Vec<CallbackRc<T>> = inner
                    .subscribers
                    .iter()
                    .filter_map(Weak::upgrade)
                    .collect();
                (value, callbacks)
            };

            if callbacks.is_empty() {
                continue;
            }

            let _span =
                debug_span!("observable.notify", subscribers = callbacks.len()).entered();
            for cb in &callbacks {
                cb(&value);
            }
        }
    }
}

/// Ends a delivery round, including one cut short by a panicking callback.
///
/// Values still queued when a callback panics are discarded.
struct DrainGuard<'a, T> {
    inner: &'a RefCell<ObservableInner<T>>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.notifying = false;
            inner.pending.clear();
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it releases the only strong reference to the callback, so the
/// weak entry in the subscriber list stops upgrading.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
