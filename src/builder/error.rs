//! Configuration errors raised while building a machine.

use thiserror::Error;

/// Errors that can occur when mapping state identifiers or building a machine.
///
/// Each variant names the precondition that failed. A failed build
/// constructs no machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("State type {type_name} declares no identifiers")]
    NoDeclaredStates { type_name: &'static str },

    #[error("State '{state}' of {type_name} has discriminant {value}, which cannot be used as an index")]
    UnmappableState {
        type_name: &'static str,
        state: &'static str,
        value: i64,
    },

    #[error("States '{first}' and '{second}' share index {index}")]
    DuplicateIndex {
        first: &'static str,
        second: &'static str,
        index: usize,
    },

    #[error("No states registered. Call .with(id, handler) before .build()")]
    NoStatesRegistered,

    #[error("Context not set. Call .with_context(context) before .build()")]
    MissingContext,

    #[error("Initial state '{state}' maps outside the state table (index {index:?}, table length {len})")]
    InitialStateOutOfRange {
        state: &'static str,
        index: Option<usize>,
        len: usize,
    },

    #[error("Initial state '{state}' has no registered handler")]
    InitialStateUnregistered { state: &'static str },

    #[error("State '{state}' is not among the declared identifiers (table length {len})")]
    UndeclaredState { state: &'static str, len: usize },

    #[error("Stack capacity must be at least 1. Call .without_stack() to disable the stack")]
    ZeroStackCapacity,

    #[error("Snapshot cannot be restored: {reason}")]
    SnapshotMismatch { reason: String },
}
