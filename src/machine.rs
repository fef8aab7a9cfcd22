//! The machine: current state, layered transition tables and observers.

use crate::core::destination::Resolve;
use crate::core::subscribers::Subscribers;
use crate::core::{
    Destination, Event, State, StateHistory, StateTransition, Subscription, Transitions,
};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One or several states passed to [`Machine::when`].
///
/// Implemented for a single state, a `Vec` of states and arrays of states.
pub trait IntoStates<S> {
    /// Collect the states.
    fn into_states(self) -> Vec<S>;
}

impl<S: State> IntoStates<S> for S {
    fn into_states(self) -> Vec<S> {
        vec![self]
    }
}

impl<S: State> IntoStates<S> for Vec<S> {
    fn into_states(self) -> Vec<S> {
        self
    }
}

impl<S: State, const N: usize> IntoStates<S> for [S; N] {
    fn into_states(self) -> Vec<S> {
        self.into()
    }
}

/// Finite state machine driven by events.
///
/// Each call to [`when`](Self::when) contributes one transition table to every
/// state it names. A state may collect several tables; they are consulted in
/// registration order and the first one holding a destination that has a
/// target for the event wins. A declared event whose destination was never set
/// does not stop the search.
///
/// # Example
///
/// ```rust
/// use machinarium::Machine;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let mut bulb: Machine<&str, &str> = Machine::new("off");
/// bulb.when("off", |t| {
///     t.on("turn-on").transition_to("on");
///     t.on("break").transition_to("broken");
/// })
/// .when("on", |t| {
///     t.on("turn-off").transition_to("off");
///     t.on("break").transition_to("broken");
/// })
/// .when("broken", |t| {
///     t.on("fix").transition_to("off");
/// });
///
/// let changes = Arc::new(AtomicUsize::new(0));
/// let seen = Arc::clone(&changes);
/// let subscription = bulb.subscribe(move || {
///     seen.fetch_add(1, Ordering::SeqCst);
/// });
///
/// bulb.send("turn-on");
/// bulb.send("turn-on"); // nothing declared for ("on", "turn-on")
/// assert_eq!(bulb.current_state(), &"on");
/// assert_eq!(changes.load(Ordering::SeqCst), 1);
///
/// subscription.unsubscribe();
/// bulb.send("break");
/// assert_eq!(bulb.current_state(), &"broken");
/// assert_eq!(changes.load(Ordering::SeqCst), 1);
/// ```
pub struct Machine<S: State, E: Event> {
    current: S,
    transitions: HashMap<S, Vec<Arc<Transitions<S, E>>>>,
    subscribers: Subscribers,
    history: Option<StateHistory<S, E>>,
}

impl<S: State + 'static, E: Event> Machine<S, E> {
    /// Create a machine in `initial` state without history recording.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: HashMap::new(),
            subscribers: Subscribers::new(),
            history: None,
        }
    }

    /// Create a machine that records every applied transition.
    pub fn with_history(initial: S) -> Self {
        Self {
            history: Some(StateHistory::new()),
            ..Self::new(initial)
        }
    }

    /// Register transitions for one or several states.
    ///
    /// `register` fills a single table that is appended to every listed state.
    /// Earlier tables for the same state are kept and take precedence.
    pub fn when<F>(&mut self, states: impl IntoStates<S>, register: F) -> &mut Self
    where
        F: FnOnce(&mut Transitions<S, E>),
    {
        let mut table = Transitions::new();
        register(&mut table);
        self.append(states.into_states(), Arc::new(table));
        self
    }

    pub(crate) fn append(&mut self, states: Vec<S>, table: Arc<Transitions<S, E>>) {
        for state in states {
            trace!(state = state.name(), events = table.len(), "registered transitions");
            self.transitions
                .entry(state)
                .or_default()
                .push(Arc::clone(&table));
        }
    }

    /// Dispatch `event`.
    ///
    /// Without a matching destination this does nothing. Otherwise the new
    /// state is computed from the current one, assigned, and every subscriber
    /// is notified once before returning, self-transitions included.
    pub fn send(&mut self, event: E) {
        let Some(resolve) = self.resolve(&event) else {
            trace!(
                state = self.current.name(),
                event = event.name(),
                "no transition"
            );
            return;
        };

        let next = resolve(&self.current);
        let previous = std::mem::replace(&mut self.current, next);

        if let Some(history) = self.history.as_mut() {
            history.record(StateTransition {
                from: previous.clone(),
                to: self.current.clone(),
                event: event.clone(),
                timestamp: Utc::now(),
            });
        }

        let notified = self.subscribers.notify();
        debug!(
            from = previous.name(),
            to = self.current.name(),
            event = event.name(),
            notified,
            "transitioned"
        );
    }
}

impl<S: State, E: Event> Machine<S, E> {
    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Whether `send(event)` would transition from the current state.
    ///
    /// Never changes state and never notifies subscribers.
    pub fn can(&self, event: E) -> bool {
        self.resolve(&event).is_some()
    }

    /// Register `callback` to run after every applied transition.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let subscription = self.subscribers.add(Arc::new(callback));
        trace!(subscribers = self.subscribers.len(), "subscribed");
        subscription
    }

    /// Recorded transitions, `None` unless history was enabled.
    pub fn history(&self) -> Option<&StateHistory<S, E>> {
        self.history.as_ref()
    }

    fn resolve(&self, event: &E) -> Option<&Resolve<S>> {
        self.transitions
            .get(&self.current)?
            .iter()
            .find_map(|table| table.lookup(event).and_then(Destination::resolve))
    }
}

impl<S: State, E: Event> fmt::Debug for Machine<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("transitions", &self.transitions)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event_enum, state_enum};
    use std::sync::atomic::{AtomicUsize, Ordering};

    state_enum! {
        enum Bulb {
            Off,
            On,
            Broken,
        }
    }

    event_enum! {
        enum Switch {
            TurnOn,
            TurnOff,
            Break,
            Fix,
        }
    }

    fn bulb() -> Machine<Bulb, Switch> {
        let mut machine = Machine::new(Bulb::Off);
        machine
            .when(Bulb::Off, |t| {
                t.on(Switch::TurnOn).transition_to(Bulb::On);
                t.on(Switch::TurnOff).transition_to(Bulb::Off);
                t.on(Switch::Break).transition_to(Bulb::Broken);
            })
            .when(Bulb::On, |t| {
                t.on(Switch::TurnOff).transition_to(Bulb::Off);
                t.on(Switch::Break).transition_to(Bulb::Broken);
            })
            .when(Bulb::Broken, |t| {
                t.on(Switch::Fix).transition_to(Bulb::Off);
            });
        machine
    }

    fn counting(machine: &Machine<Bulb, Switch>) -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&count);
        let subscription = machine.subscribe(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        (count, subscription)
    }

    #[test]
    fn starts_in_initial_state() {
        let machine: Machine<Bulb, Switch> = Machine::new(Bulb::Broken);
        assert_eq!(machine.current_state(), &Bulb::Broken);
    }

    #[test]
    fn bulb_cycle() {
        let mut machine = bulb();

        machine.send(Switch::TurnOn);
        assert_eq!(machine.current_state(), &Bulb::On);

        machine.send(Switch::Break);
        assert_eq!(machine.current_state(), &Bulb::Broken);

        machine.send(Switch::Fix);
        assert_eq!(machine.current_state(), &Bulb::Off);
    }

    #[test]
    fn self_transition_notifies_once() {
        let mut machine = bulb();
        let (count, _subscription) = counting(&machine);

        machine.send(Switch::TurnOff);

        assert_eq!(machine.current_state(), &Bulb::Off);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn undeclared_event_is_noop() {
        let mut machine = bulb();
        let (count, _subscription) = counting(&machine);

        machine.send(Switch::Fix);

        assert_eq!(machine.current_state(), &Bulb::Off);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn state_without_tables_is_noop() {
        let mut machine: Machine<Bulb, Switch> = Machine::new(Bulb::On);
        machine.when(Bulb::Off, |t| {
            t.on(Switch::TurnOn).transition_to(Bulb::On);
        });

        assert!(!machine.can(Switch::TurnOn));
        machine.send(Switch::TurnOn);
        assert_eq!(machine.current_state(), &Bulb::On);
    }

    #[test]
    fn declared_without_target_is_noop() {
        let mut machine: Machine<Bulb, Switch> = Machine::new(Bulb::Off);
        machine.when(Bulb::Off, |t| {
            t.on(Switch::TurnOn);
        });
        let (count, _subscription) = counting(&machine);

        assert!(!machine.can(Switch::TurnOn));
        machine.send(Switch::TurnOn);

        assert_eq!(machine.current_state(), &Bulb::Off);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn earlier_table_takes_precedence() {
        let mut machine: Machine<Bulb, Switch> = Machine::new(Bulb::Off);
        machine
            .when(Bulb::Off, |t| {
                t.on(Switch::Break).transition_to(Bulb::Broken);
            })
            .when(Bulb::Off, |t| {
                t.on(Switch::Break).transition_to(Bulb::On);
            });

        machine.send(Switch::Break);
        assert_eq!(machine.current_state(), &Bulb::Broken);
    }

    #[test]
    fn empty_destination_falls_through_to_later_table() {
        let mut machine: Machine<Bulb, Switch> = Machine::new(Bulb::Off);
        machine
            .when(Bulb::Off, |t| {
                t.on(Switch::Break);
            })
            .when(Bulb::Off, |t| {
                t.on(Switch::Break).transition_to(Bulb::Broken);
            });

        assert!(machine.can(Switch::Break));
        machine.send(Switch::Break);
        assert_eq!(machine.current_state(), &Bulb::Broken);
    }

    #[test]
    fn tables_for_same_state_accumulate() {
        let mut machine: Machine<Bulb, Switch> = Machine::new(Bulb::Off);
        machine
            .when(Bulb::Off, |t| {
                t.on(Switch::TurnOn).transition_to(Bulb::On);
            })
            .when(Bulb::On, |t| {
                t.on(Switch::TurnOff).transition_to(Bulb::Off);
            })
            .when(Bulb::Off, |t| {
                t.on(Switch::Break).transition_to(Bulb::Broken);
            });

        assert!(machine.can(Switch::TurnOn));
        assert!(machine.can(Switch::Break));

        machine.send(Switch::TurnOn);
        machine.send(Switch::TurnOff);
        machine.send(Switch::Break);
        assert_eq!(machine.current_state(), &Bulb::Broken);
    }

    #[test]
    fn multi_state_registration_fans_out() {
        let mut machine: Machine<Bulb, Switch> = Machine::new(Bulb::Off);
        machine
            .when([Bulb::On, Bulb::Off], |t| {
                t.on(Switch::Break).transition_to(Bulb::Broken);
            })
            .when(Bulb::Broken, |t| {
                t.on(Switch::TurnOn).transition_to(Bulb::On);
            });

        machine.send(Switch::Break);
        assert_eq!(machine.current_state(), &Bulb::Broken);

        machine.send(Switch::TurnOn);
        assert_eq!(machine.current_state(), &Bulb::On);

        machine.send(Switch::Break);
        assert_eq!(machine.current_state(), &Bulb::Broken);
    }

    #[test]
    fn dynamic_destination_reads_state_at_dispatch() {
        let mut machine: Machine<Bulb, Switch> = Machine::new(Bulb::Off);
        machine.when(vec![Bulb::On, Bulb::Off], |t| {
            t.on(Switch::TurnOn).transition_with(|prev| match prev {
                Bulb::On => Bulb::Off,
                _ => Bulb::On,
            });
        });

        machine.send(Switch::TurnOn);
        assert_eq!(machine.current_state(), &Bulb::On);

        machine.send(Switch::TurnOn);
        assert_eq!(machine.current_state(), &Bulb::Off);
    }

    #[test]
    fn can_does_not_mutate() {
        let machine = bulb();
        let (count, _subscription) = counting(&machine);

        for _ in 0..3 {
            assert!(machine.can(Switch::TurnOn));
            assert!(!machine.can(Switch::Fix));
        }

        assert_eq!(machine.current_state(), &Bulb::Off);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut machine = bulb();
        let (count, subscription) = counting(&machine);

        machine.send(Switch::TurnOn);
        subscription.unsubscribe();
        subscription.unsubscribe();
        machine.send(Switch::TurnOff);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn notification_counts_only_resolved_sends() {
        let mut machine = bulb();
        let observed = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&observed);
        let _subscription = machine.subscribe(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        });

        machine.send(Switch::TurnOn);
        machine.send(Switch::Break);
        machine.send(Switch::TurnOn);

        assert_eq!(observed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn history_disabled_by_default() {
        let mut machine = bulb();
        machine.send(Switch::TurnOn);
        assert!(machine.history().is_none());
    }

    #[test]
    fn history_records_applied_transitions_only() {
        let mut machine: Machine<Bulb, Switch> = Machine::with_history(Bulb::Off);
        machine.when(Bulb::Off, |t| {
            t.on(Switch::TurnOff).transition_to(Bulb::Off);
            t.on(Switch::TurnOn).transition_to(Bulb::On);
        });

        machine.send(Switch::TurnOff);
        machine.send(Switch::Fix);
        machine.send(Switch::TurnOn);

        let history = machine.history().unwrap();
        assert_eq!(history.transitions().len(), 2);
        assert_eq!(history.transitions()[0].event, Switch::TurnOff);
        assert_eq!(history.get_path(), vec![&Bulb::Off, &Bulb::Off, &Bulb::On]);
    }

    #[test]
    fn machine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Machine<Bulb, Switch>>();
    }
}
