//! Listener bookkeeping shared by identity providers and application stores.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked with each new value of a subscribed source.
pub type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

type Slot<T> = Arc<Mutex<Option<Listener<T>>>>;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by every `subscribe` call.
///
/// Cancelling (explicitly or by dropping) waits for an in-flight delivery to the same listener
/// and guarantees that no later delivery reaches it. A listener must not drop its own
/// subscription from inside the callback.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Handle for sources that never deliver again.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

struct RegistryInner<T> {
    next_id: AtomicU64,
    slots: Mutex<BTreeMap<u64, Slot<T>>>,
}

/// Ordered set of listeners with cancellable registrations.
pub struct ListenerRegistry<T> {
    inner: Arc<RegistryInner<T>>,
}

impl<T> Clone for ListenerRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                next_id: AtomicU64::new(1),
                slots: Mutex::new(BTreeMap::new()),
            }),
        }
    }
}

impl<T: 'static> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: Listener<T>) -> Subscription {
        self.attach(Arc::new(Mutex::new(Some(listener))))
    }

    /// Register and deliver `initial` before any later notification can reach the listener.
    pub fn register_and_prime(&self, listener: Listener<T>, initial: &T) -> Subscription {
        let slot: Slot<T> = Arc::new(Mutex::new(None));
        let guard_slot = Arc::clone(&slot);
        let mut guard = lock(&guard_slot);
        *guard = Some(listener);
        let subscription = self.attach(slot);
        if let Some(listener) = guard.as_ref() {
            listener(initial);
        }
        drop(guard);
        subscription
    }

    /// Deliver `value` to every live listener; returns how many were called.
    pub fn notify(&self, value: &T) -> usize {
        let slots: Vec<Slot<T>> = lock(&self.inner.slots).values().cloned().collect();
        let mut delivered = 0;
        for slot in slots {
            let guard = lock(&slot);
            if let Some(listener) = guard.as_ref() {
                listener(value);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        lock(&self.inner.slots).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn attach(&self, slot: Slot<T>) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.slots).insert(id, Arc::clone(&slot));

        let inner = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                lock(&inner.slots).remove(&id);
            }
            lock(&slot).take();
        })
    }
}
