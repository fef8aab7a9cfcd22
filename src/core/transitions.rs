//! Transition table contributed by a single `when` call.

use super::destination::Destination;
use super::state::{Event, State};
use indexmap::IndexMap;
use std::fmt;

/// Events declared for one group of states, each with its destination.
///
/// A table is filled once by the callback passed to
/// [`Machine::when`](crate::Machine::when) and shared by every state named in
/// that call. Declaring the same event twice replaces the earlier destination.
pub struct Transitions<S: State, E: Event> {
    destinations: IndexMap<E, Destination<S>>,
}

impl<S: State + 'static, E: Event> Transitions<S, E> {
    pub(crate) fn new() -> Self {
        Self {
            destinations: IndexMap::new(),
        }
    }

    /// Declare `event` and return its (empty) destination.
    ///
    /// ```rust
    /// use machinarium::Machine;
    ///
    /// let mut machine: Machine<&str, &str> = Machine::new("off");
    /// machine.when("off", |t| {
    ///     t.on("turn-on").transition_to("on");
    ///     t.on("break").transition_to("broken");
    /// });
    ///
    /// assert!(machine.can("break"));
    /// ```
    pub fn on(&mut self, event: E) -> &mut Destination<S> {
        // Fresh destination even when the event was already declared.
        self.destinations.insert(event.clone(), Destination::new());
        &mut self.destinations[&event]
    }
}

impl<S: State, E: Event> Transitions<S, E> {
    pub(crate) fn lookup(&self, event: &E) -> Option<&Destination<S>> {
        self.destinations.get(event)
    }

    pub(crate) fn len(&self) -> usize {
        self.destinations.len()
    }
}

impl<S: State, E: Event> fmt::Debug for Transitions<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.destinations.iter()).finish()
    }
}
