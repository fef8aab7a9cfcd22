//! Initial-state configuration and the machine factory.

use crate::builder::error::OptionsError;
use crate::core::{Event, State};
use crate::machine::Machine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Options a machine is created from.
///
/// ```rust
/// use machinarium::MachineOptions;
///
/// let options: MachineOptions<String> =
///     MachineOptions::from_json(r#"{ "initial_state": "off" }"#).unwrap();
///
/// assert_eq!(options.initial_state, "off");
/// assert!(!options.record_history);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineOptions<S> {
    /// State the machine starts in
    pub initial_state: S,
    /// Keep a [`StateHistory`](crate::StateHistory) of applied transitions
    #[serde(default)]
    pub record_history: bool,
}

impl<S> MachineOptions<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            record_history: false,
        }
    }

    /// Enable or disable history recording.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }
}

impl<S: DeserializeOwned> MachineOptions<S> {
    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Create a machine from `options`.
///
/// ```rust
/// use machinarium::{create_machine, MachineOptions};
///
/// let machine = create_machine::<&str, &str>(MachineOptions::new("off"));
/// assert_eq!(machine.current_state(), &"off");
/// ```
pub fn create_machine<S, E>(options: MachineOptions<S>) -> Machine<S, E>
where
    S: State + 'static,
    E: Event,
{
    if options.record_history {
        Machine::with_history(options.initial_state)
    } else {
        Machine::new(options.initial_state)
    }
}
