//! State and event identifier traits.
//!
//! States and events are opaque values to the engine. It only needs to clone,
//! compare and hash them; `name` exists for diagnostics.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values a machine can occupy.
///
/// The engine never enumerates or validates the state domain. Any value of the
/// implementing type is accepted; a value nobody registered transitions for
/// simply never matches anything.
///
/// # Required Traits
///
/// - `Clone`: the current state is handed to dynamic destinations and history
/// - `Eq` + `Hash`: states key the transition tables
/// - `Debug`: diagnostics
/// - `Send` + `Sync`: machines can be moved behind a caller-owned mutex
///
/// # Example
///
/// ```rust
/// use machinarium::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Bulb {
///     On,
///     Off,
/// }
///
/// impl State for Bulb {
///     fn name(&self) -> &str {
///         match self {
///             Self::On => "on",
///             Self::Off => "off",
///         }
///     }
/// }
///
/// assert_eq!(Bulb::Off.name(), "off");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for stimuli sent to a machine.
///
/// Same treatment as [`State`]: opaque, comparable, never validated.
pub trait Event: Clone + Eq + Hash + Debug + Send + Sync {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}

impl State for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl Event for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
