//! Change observers and their subscription handles.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Callback invoked after every applied transition.
pub(crate) type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: BTreeMap<u64, Callback>,
}

/// Set of change callbacks, notified in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    inner: Arc<Mutex<Registry>>,
}

impl Subscribers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&self, callback: Callback) -> Subscription {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.insert(id, callback);

        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Invoke every callback registered at call time.
    ///
    /// Callbacks run without the lock held, so they may subscribe or
    /// unsubscribe while being notified. Returns how many were invoked.
    pub(crate) fn notify(&self) -> usize {
        let snapshot: Vec<Callback> = self.lock().callbacks.values().cloned().collect();
        for callback in &snapshot {
            callback();
        }
        snapshot.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().callbacks.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle returned by [`Machine::subscribe`](crate::Machine::subscribe).
///
/// Dropping the handle does not unsubscribe; call [`unsubscribe`](Self::unsubscribe).
#[must_use = "the subscription can only be removed through this handle"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Remove this registration.
    ///
    /// Idempotent, and a no-op once the machine itself is gone.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .callbacks
            .remove(&self.id)
            .is_some();
        if removed {
            tracing::trace!(subscription = self.id, "unsubscribed");
        }
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .callbacks
                .contains_key(&self.id)
        })
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
