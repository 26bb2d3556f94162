//! Builder API for state machine construction.
//!
//! This module provides the fluent [`MachineBuilder`], which both builds new
//! machines and derives modified copies of existing ones, and the
//! [`state_id!`](crate::state_id) macro for declaring identifiers.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::ConfigurationError;
pub use machine::MachineBuilder;
