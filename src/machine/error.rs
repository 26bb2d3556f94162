//! Runtime errors raised by machine operations.

use std::fmt;
use thiserror::Error;

/// Why a transition target has no handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unregistered {
    /// The state was never registered with this machine or its ancestors.
    NeverRegistered,
    /// The state was registered and later removed with `without`.
    Removed,
}

impl fmt::Display for Unregistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeverRegistered => f.write_str("never registered"),
            Self::Removed => f.write_str("removed"),
        }
    }
}

/// Errors that can occur during transitions.
///
/// A failed operation leaves the machine exactly as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("State '{state}' is not registered ({reason})")]
    StateNotRegistered {
        state: &'static str,
        reason: Unregistered,
    },

    #[error("Machine was built without a stack. Call .with_stack(capacity) on the builder")]
    StackNotEnabled,

    #[error("Stack is full (capacity {capacity})")]
    StackOverflow { capacity: usize },
}

impl TransitionError {
    /// The reason a target was unregistered, if that is what failed.
    pub fn unregistered(&self) -> Option<Unregistered> {
        match self {
            Self::StateNotRegistered { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_reason() {
        let never = TransitionError::StateNotRegistered {
            state: "Shop",
            reason: Unregistered::NeverRegistered,
        };
        let removed = TransitionError::StateNotRegistered {
            state: "Shop",
            reason: Unregistered::Removed,
        };

        assert_eq!(never.to_string(), "State 'Shop' is not registered (never registered)");
        assert_eq!(removed.to_string(), "State 'Shop' is not registered (removed)");
        assert_eq!(removed.unregistered(), Some(Unregistered::Removed));
        assert_eq!(TransitionError::StackNotEnabled.unregistered(), None);
    }
}
