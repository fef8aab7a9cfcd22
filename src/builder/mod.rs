//! Builder API for ergonomic machine construction.
//!
//! This module provides the option-driven factory, a fluent builder and
//! macros for declaring state and event enums with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod options;

pub use error::{BuildError, OptionsError};
pub use machine::MachineBuilder;
pub use options::{create_machine, MachineOptions};
