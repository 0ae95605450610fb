//! Observable values with explicit subscription handles.
//!
//! Every store in the crate is an [`Observable`]. Subscribing returns a
//! [`Subscription`]; the listener stays registered until the handle is
//! dropped or [`Subscription::unsubscribe`] is called.
//!
//! Notifications are delivered in the order values were published. A value
//! published from inside a listener is queued and delivered after the
//! current round finishes, so listeners never observe values out of order.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Callback invoked with each published value.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Lock a mutex, recovering the data if a listener panicked while holding it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A value that notifies registered listeners when it changes.
pub struct Observable<T> {
    value: Mutex<T>,
    listeners: Arc<Mutex<Listeners<T>>>,
    queue: Mutex<VecDeque<T>>,
    draining: AtomicBool,
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            listeners: Arc::new(Mutex::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
            queue: Mutex::new(VecDeque::new()),
            draining: AtomicBool::new(false),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        lock(&self.value).clone()
    }

    /// Store `value` and notify listeners.
    ///
    /// Returns `false` without notifying when `value` equals the current one.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = lock(&self.value);
            if *current == value {
                return false;
            }
            *current = value.clone();
            // Queued under the value lock so notification order matches the
            // order values were stored, across threads too.
            lock(&self.queue).push_back(value);
        }
        self.publish();
        true
    }

    /// Register a listener. It is not called with the current value.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut listeners = lock(&self.listeners);
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::new(listener)));
            id
        };

        let registry: Weak<Mutex<Listeners<T>>> = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }

    fn publish(&self) {
        loop {
            // Another caller is already draining; it will pick the queued
            // value up.
            if self.draining.swap(true, Ordering::AcqRel) {
                return;
            }

            {
                let _draining = DrainFlag(&self.draining);
                while let Some(value) = self.next_queued() {
                    for listener in self.snapshot() {
                        listener(&value);
                    }
                }
            }

            if lock(&self.queue).is_empty() {
                return;
            }
        }
    }

    fn next_queued(&self) -> Option<T> {
        lock(&self.queue).pop_front()
    }

    fn snapshot(&self) -> Vec<Listener<T>> {
        lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Clears the draining flag when a drain ends, including by a listener panic.
struct DrainFlag<'a>(&'a AtomicBool);

impl Drop for DrainFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handle that keeps a listener attached.
///
/// Dropping the handle detaches the listener.
#[must_use = "dropping a Subscription detaches its listener immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub(crate) fn new<F>(detach: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detach the listener now.
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
