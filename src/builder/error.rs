//! Errors raised while configuring a machine.
//!
//! Running machines never fail: unmatched events are ignored. Only building
//! and loading options can go wrong.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) or .options(options) before .build()")]
    MissingInitialState,
}

/// Errors that can occur when loading [`MachineOptions`](crate::MachineOptions).
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Invalid machine options: {0}")]
    Parse(#[from] serde_json::Error),
}
