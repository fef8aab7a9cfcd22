//! Transition history tracking.
//!
//! Machines created with `record_history` append one record per applied
//! transition. Events that resolve to nothing leave no trace.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use machinarium::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "off",
///     to: "on",
///     event: "turn-on",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "on");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<S, E> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered the transition
    pub event: E,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions.
///
/// # Example
///
/// ```rust
/// use machinarium::{create_machine, MachineOptions};
///
/// let mut machine = create_machine::<&str, &str>(MachineOptions::new("off").with_history(true));
/// machine
///     .when("off", |t| {
///         t.on("turn-on").transition_to("on");
///     })
///     .when("on", |t| {
///         t.on("break").transition_to("broken");
///     });
///
/// machine.send("turn-on");
/// machine.send("break");
///
/// let path = machine.history().unwrap().get_path();
/// assert_eq!(path, vec![&"off", &"on", &"broken"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S, E> {
    transitions: Vec<StateTransition<S, E>>,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: StateTransition<S, E>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the `to`
    /// state of each transition. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }
}
