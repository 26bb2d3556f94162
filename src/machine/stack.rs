//! Suspend/resume stack: `push` and `pop`.

use super::{Machine, TransitionError};
use crate::core::{Bundle, StateId};
use std::mem;

/// Bounded stack of suspended states, most recent last.
///
/// Storage is reserved up front, so pushing never reallocates.
pub(crate) struct Stack<S: StateId, C> {
    entries: Vec<(S, Bundle<S, C>)>,
    capacity: usize,
}

impl<S: StateId, C> Stack<S, C> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Callers check `is_full` first.
    pub fn push(&mut self, id: S, bundle: Bundle<S, C>) {
        debug_assert!(!self.is_full());
        self.entries.push((id, bundle));
    }

    pub fn pop(&mut self) -> Option<(S, Bundle<S, C>)> {
        self.entries.pop()
    }

    pub fn ids(&self) -> impl Iterator<Item = S> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

impl<S: StateId, C> Machine<S, C> {
    pub fn has_stack(&self) -> bool {
        self.stack.is_some()
    }

    /// Number of suspended states; zero without a stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.as_ref().map_or(0, Stack::len)
    }

    pub fn stack_capacity(&self) -> Option<usize> {
        self.stack.as_ref().map(Stack::capacity)
    }

    /// Suspended states, oldest first.
    pub fn suspended_states(&self) -> impl Iterator<Item = S> + '_ {
        self.stack.iter().flat_map(|stack| stack.ids())
    }

    /// Suspend the active state and enter `next` on top of it.
    ///
    /// A state that supports [`Roles::SUSPEND`](crate::core::Roles::SUSPEND)
    /// gets `on_suspend`; any other state gets `on_exit(next)`. `next` is
    /// then entered as by [`go_to`](Machine::go_to). Fails without effect if
    /// there is no stack, the stack is full, or `next` is unregistered.
    pub fn push(&mut self, next: S) -> Result<(), TransitionError> {
        match &self.stack {
            None => return Err(TransitionError::StackNotEnabled),
            Some(stack) if stack.is_full() => {
                return Err(TransitionError::StackOverflow {
                    capacity: stack.capacity(),
                })
            }
            Some(_) => {}
        }
        let bundle = self.lookup(next)?.clone();

        let previous = self.current;
        let mut context = self.context.borrow_mut();
        if !self.current_bundle.suspend(&mut context) {
            self.current_bundle.exit(next, &mut context);
        }
        let suspended = mem::replace(&mut self.current_bundle, bundle);
        if let Some(stack) = self.stack.as_mut() {
            stack.push(previous, suspended);
        }
        self.current = next;
        self.current_bundle.enter(previous, &mut context);

        tracing::trace!(
            from = previous.name(),
            to = next.name(),
            depth = self.stack_depth(),
            "push"
        );
        Ok(())
    }

    /// Return to the most recently suspended state.
    ///
    /// The active state gets `on_exit(restored)`. The restored state gets
    /// `on_resume` if it supports suspension, otherwise
    /// `on_enter(exited)`. Returns the restored state, or `None` if the
    /// stack was empty.
    pub fn pop(&mut self) -> Result<Option<S>, TransitionError> {
        let stack = self.stack.as_mut().ok_or(TransitionError::StackNotEnabled)?;
        let Some((restored, bundle)) = stack.pop() else {
            return Ok(None);
        };

        let exited = self.current;
        let mut context = self.context.borrow_mut();
        self.current_bundle.exit(restored, &mut context);
        self.current = restored;
        self.current_bundle = bundle;
        if !self.current_bundle.resume(&mut context) {
            self.current_bundle.enter(exited, &mut context);
        }

        tracing::trace!(
            from = exited.name(),
            to = restored.name(),
            depth = self.stack_depth(),
            "pop"
        );
        Ok(Some(restored))
    }
}
