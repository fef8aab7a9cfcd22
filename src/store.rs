//! External-store surface for reactive consumers.
//!
//! A rendering layer needs only two things from a machine: a snapshot of the
//! current state and a way to hear that the snapshot went stale. That pair is
//! [`ExternalStore`]. [`Watch`] turns change notifications into a version
//! counter a render loop can poll, and [`MachineBinding`] bundles snapshot,
//! `send` and `can_transition` over a [`SharedMachine`].

use crate::core::{Event, State, Subscription, Transitions};
use crate::machine::{IntoStates, Machine};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Snapshot plus change notification.
pub trait ExternalStore {
    type Snapshot;

    /// Current value.
    fn snapshot(&self) -> Self::Snapshot;

    /// Run `on_change` whenever the snapshot may have changed.
    fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static;
}

impl<S: State, E: Event> ExternalStore for Machine<S, E> {
    type Snapshot = S;

    fn snapshot(&self) -> S {
        self.current_state().clone()
    }

    fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        Machine::subscribe(self, on_change)
    }
}

/// A machine shared between owners behind a mutex.
///
/// Subscribers run while the lock is held by `send`, so they must not call
/// back into the same `SharedMachine`.
///
/// ```rust
/// use machinarium::{Machine, SharedMachine};
///
/// let machine = SharedMachine::new(Machine::<&str, &str>::new("off"));
/// machine.lock().when("off", |t| {
///     t.on("turn-on").transition_to("on");
/// });
///
/// let handle = machine.clone();
/// handle.send("turn-on");
/// assert_eq!(machine.current_state(), "on");
/// ```
pub struct SharedMachine<S: State, E: Event> {
    inner: Arc<Mutex<Machine<S, E>>>,
}

impl<S: State, E: Event> Clone for SharedMachine<S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State + 'static, E: Event> SharedMachine<S, E> {
    pub fn new(machine: Machine<S, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    /// Exclusive access, e.g. for registering transitions.
    pub fn lock(&self) -> MutexGuard<'_, Machine<S, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Machine::when`].
    pub fn when<F>(&self, states: impl IntoStates<S>, register: F) -> &Self
    where
        F: FnOnce(&mut Transitions<S, E>),
    {
        self.lock().when(states, register);
        self
    }

    pub fn current_state(&self) -> S {
        self.lock().current_state().clone()
    }

    pub fn send(&self, event: E) {
        self.lock().send(event);
    }

    pub fn can(&self, event: E) -> bool {
        self.lock().can(event)
    }
}

impl<S: State + 'static, E: Event> ExternalStore for SharedMachine<S, E> {
    type Snapshot = S;

    fn snapshot(&self) -> S {
        self.current_state()
    }

    fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.lock().subscribe(on_change)
    }
}

/// Change counter fed by a store subscription.
///
/// Dropping the watch removes its subscription.
pub struct Watch {
    version: Arc<AtomicU64>,
    seen: u64,
    subscription: Subscription,
}

impl Watch {
    pub fn new<T: ExternalStore>(store: &T) -> Self {
        let version = Arc::new(AtomicU64::new(0));
        let bump = Arc::clone(&version);
        let subscription = store.subscribe(move || {
            bump.fetch_add(1, Ordering::SeqCst);
        });

        Self {
            version,
            seen: 0,
            subscription,
        }
    }

    /// Number of notifications received so far.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Whether a notification arrived since the last [`mark_seen`](Self::mark_seen).
    pub fn has_changed(&self) -> bool {
        self.version() != self.seen
    }

    pub fn mark_seen(&mut self) {
        self.seen = self.version();
    }
}

impl Drop for Watch {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

/// What a UI component holds: the latest state and the machine's commands.
///
/// ```rust
/// use machinarium::{Machine, MachineBinding, SharedMachine};
///
/// let machine = SharedMachine::new(Machine::<&str, &str>::new("off"));
/// machine
///     .when("off", |t| {
///         t.on("turn-on").transition_to("on");
///     })
///     .when("on", |t| {
///         t.on("turn-off").transition_to("off");
///     });
///
/// let mut binding = MachineBinding::new(machine.clone());
/// assert!(binding.can_transition("turn-on"));
///
/// machine.send("turn-on");
/// assert!(binding.is_stale());
/// assert_eq!(binding.state(), &"on");
/// assert!(binding.can_transition("turn-off"));
/// ```
pub struct MachineBinding<S: State, E: Event> {
    machine: SharedMachine<S, E>,
    watch: Watch,
    state: S,
}

impl<S: State + 'static, E: Event> MachineBinding<S, E> {
    pub fn new(machine: SharedMachine<S, E>) -> Self {
        let watch = Watch::new(&machine);
        let state = machine.snapshot();
        Self {
            machine,
            watch,
            state,
        }
    }

    /// Whether the machine changed since the snapshot was last read.
    pub fn is_stale(&self) -> bool {
        self.watch.has_changed()
    }

    /// Latest state, re-read only after a change notification.
    pub fn state(&mut self) -> &S {
        if self.watch.has_changed() {
            self.watch.mark_seen();
            self.state = self.machine.snapshot();
        }
        &self.state
    }

    pub fn send(&self, event: E) {
        self.machine.send(event);
    }

    pub fn can_transition(&self, event: E) -> bool {
        self.machine.can(event)
    }
}
