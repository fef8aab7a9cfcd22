//! Destination of a single declared transition.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Function computing the next state from the previous one.
/// Literal destinations are stored as constant functions.
pub(crate) type Resolve<S> = Arc<dyn Fn(&S) -> S + Send + Sync>;

/// Target of an `on(event)` declaration.
///
/// A destination starts empty. An empty destination is valid: the event is
/// declared but has no effect, and resolution skips it. Setting a target again
/// replaces the previous one.
///
/// # Example
///
/// ```rust
/// use machinarium::Machine;
///
/// let mut machine: Machine<&str, &str> = Machine::new("off");
///
/// machine
///     .when("off", |t| {
///         t.on("turn-on").transition_to("on");
///     })
///     .when(["on", "off"], |t| {
///         t.on("toggle")
///             .transition_with(|prev| if *prev == "on" { "off" } else { "on" });
///     });
///
/// machine.send("toggle");
/// assert_eq!(machine.current_state(), &"on");
/// ```
pub struct Destination<S: State> {
    resolve: Option<Resolve<S>>,
}

impl<S: State + 'static> Destination<S> {
    pub(crate) fn new() -> Self {
        Self { resolve: None }
    }

    /// Transition to a fixed state.
    pub fn transition_to(&mut self, state: S) {
        self.resolve = Some(Arc::new(move |_: &S| state.clone()));
    }

    /// Transition to a state computed from the state at dispatch time.
    pub fn transition_with<F>(&mut self, destination: F)
    where
        F: Fn(&S) -> S + Send + Sync + 'static,
    {
        self.resolve = Some(Arc::new(destination));
    }
}

impl<S: State> Destination<S> {
    /// The stored computation, `None` if no target was ever set.
    pub(crate) fn resolve(&self) -> Option<&Resolve<S>> {
        self.resolve.as_ref()
    }
}

impl<S: State> fmt::Debug for Destination<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("is_set", &self.resolve.is_some())
            .finish()
    }
}
