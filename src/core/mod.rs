//! Building blocks of a machine.
//!
//! - State and event identifiers via the `State` and `Event` traits
//! - Destinations and the per-`when` transition tables holding them
//! - Subscriptions to state changes
//! - Optional transition history
//!
//! Nothing here performs I/O. Raw lookups stay crate-private; callers only see
//! the declaration methods (`on`, `transition_to`, `transition_with`).

pub(crate) mod destination;
mod history;
mod state;
pub(crate) mod subscribers;
mod transitions;

pub use destination::Destination;
pub use history::{StateHistory, StateTransition};
pub use state::{Event, State};
pub use subscribers::Subscription;
pub use transitions::Transitions;
