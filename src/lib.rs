//! Machinarium: a small declarative finite state machine library
//!
//! A machine holds a current state and, per state, an ordered list of
//! transition tables. Each [`Machine::when`] call builds one table and appends
//! it to every state it names; sending an event consults those tables in
//! registration order and applies the first destination that has a target.
//!
//! # Core Concepts
//!
//! - **State / Event**: opaque identifiers via the [`State`] and [`Event`] traits
//! - **Destination**: a fixed target or a function of the previous state
//! - **Transitions**: the table one `when` call contributes
//! - **Subscriptions**: callbacks run once per applied transition
//!
//! Unmatched events are silently ignored; running a machine never fails.
//!
//! # Example
//!
//! ```rust
//! use machinarium::{create_machine, event_enum, state_enum, Machine, MachineOptions};
//!
//! state_enum! {
//!     enum Bulb {
//!         Off,
//!         On,
//!         Broken,
//!     }
//! }
//!
//! event_enum! {
//!     enum Switch {
//!         TurnOn,
//!         TurnOff,
//!         Break,
//!         Fix,
//!     }
//! }
//!
//! let mut bulb: Machine<Bulb, Switch> = create_machine(MachineOptions::new(Bulb::Off));
//! bulb.when([Bulb::Off, Bulb::On], |t| {
//!     t.on(Switch::Break).transition_to(Bulb::Broken);
//! })
//! .when(Bulb::Off, |t| {
//!     t.on(Switch::TurnOn).transition_to(Bulb::On);
//! })
//! .when(Bulb::On, |t| {
//!     t.on(Switch::TurnOff).transition_to(Bulb::Off);
//! })
//! .when(Bulb::Broken, |t| {
//!     t.on(Switch::Fix).transition_to(Bulb::Off);
//! });
//!
//! bulb.send(Switch::TurnOn);
//! assert_eq!(bulb.current_state(), &Bulb::On);
//! assert!(!bulb.can(Switch::Fix));
//!
//! bulb.send(Switch::Break);
//! assert_eq!(bulb.current_state(), &Bulb::Broken);
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod store;

// Re-export commonly used types
pub use crate::builder::{
    create_machine, BuildError, MachineBuilder, MachineOptions, OptionsError,
};
pub use crate::core::{
    Destination, Event, State, StateHistory, StateTransition, Subscription, Transitions,
};
pub use crate::machine::{IntoStates, Machine};
pub use crate::store::{ExternalStore, MachineBinding, SharedMachine, Watch};
