//! Builder for constructing machines in one expression.

use crate::builder::error::BuildError;
use crate::builder::options::{create_machine, MachineOptions};
use crate::core::{Event, State, Transitions};
use crate::machine::{IntoStates, Machine};
use std::sync::Arc;

/// Builder for constructing machines with a fluent API.
///
/// Tables registered with [`when`](Self::when) are appended in call order at
/// [`build`](Self::build), so precedence matches calling
/// [`Machine::when`] in the same order.
///
/// ```rust
/// use machinarium::MachineBuilder;
///
/// let mut bulb = MachineBuilder::<&str, &str>::new()
///     .initial("off")
///     .when("off", |t| {
///         t.on("turn-on").transition_to("on");
///     })
///     .when("on", |t| {
///         t.on("turn-off").transition_to("off");
///     })
///     .build()
///     .unwrap();
///
/// bulb.send("turn-on");
/// assert_eq!(bulb.current_state(), &"on");
/// ```
pub struct MachineBuilder<S: State, E: Event> {
    initial: Option<S>,
    record_history: bool,
    tables: Vec<(Vec<S>, Transitions<S, E>)>,
}

impl<S: State + 'static, E: Event> MachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            record_history: false,
            tables: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Record applied transitions.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Take initial state and history setting from `options`.
    pub fn options(self, options: MachineOptions<S>) -> Self {
        self.initial(options.initial_state)
            .record_history(options.record_history)
    }

    /// Queue a transition table for one or several states.
    pub fn when<F>(mut self, states: impl IntoStates<S>, register: F) -> Self
    where
        F: FnOnce(&mut Transitions<S, E>),
    {
        let mut table = Transitions::new();
        register(&mut table);
        self.tables.push((states.into_states(), table));
        self
    }

    /// Build the machine.
    /// Returns an error if no initial state was given.
    pub fn build(self) -> Result<Machine<S, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = create_machine(MachineOptions {
            initial_state: initial,
            record_history: self.record_history,
        });
        for (states, table) in self.tables {
            machine.append(states, Arc::new(table));
        }

        Ok(machine)
    }
}

impl<S: State + 'static, E: Event> Default for MachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
