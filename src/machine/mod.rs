//! The running state machine.
//!
//! A [`Machine`] is produced by [`MachineBuilder::build`](crate::builder::MachineBuilder::build)
//! and then driven in place by the host loop:
//!
//! - transitions: [`go_to`](Machine::go_to), [`reenter`](Machine::reenter),
//!   [`push`](Machine::push), [`pop`](Machine::pop)
//! - ticks: [`update`](Machine::update), [`fixed_update`](Machine::fixed_update),
//!   [`late_update`](Machine::late_update), gated by [`pause`](Machine::pause)
//!
//! Nothing here allocates. Every operation runs to completion on the
//! caller's thread.
//!
//! Dropping a machine does not exit its current state. Hosts that need a
//! final exit notification should transition to a teardown state first.

mod engine;
pub mod error;
mod stack;

pub use error::{TransitionError, Unregistered};
pub(crate) use stack::Stack;

use crate::core::{index, Bundle, FrameTime, Roles, StateId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A built state machine over identifiers `S` sharing a context `C`.
///
/// # Panics
///
/// The context is borrowed mutably for each callback. Calling into the
/// machine while holding a borrow of its context panics.
pub struct Machine<S: StateId, C> {
    table: Box<[Bundle<S, C>]>,
    removed: Box<[bool]>,
    current: S,
    current_bundle: Bundle<S, C>,
    context: Rc<RefCell<C>>,
    paused: bool,
    stack: Option<Stack<S, C>>,
}

/// Everything a validated builder hands over to a new machine.
pub(crate) struct Parts<S: StateId, C> {
    pub table: Box<[Bundle<S, C>]>,
    pub removed: Box<[bool]>,
    pub initial: S,
    pub initial_bundle: Bundle<S, C>,
    pub context: Rc<RefCell<C>>,
    pub paused: bool,
    pub stack: Option<Stack<S, C>>,
}

impl<S: StateId, C> Machine<S, C> {
    /// Assemble a machine and enter its initial state.
    pub(crate) fn start(parts: Parts<S, C>) -> Self {
        let machine = Self {
            table: parts.table,
            removed: parts.removed,
            current: parts.initial,
            current_bundle: parts.initial_bundle,
            context: parts.context,
            paused: parts.paused,
            stack: parts.stack,
        };
        machine
            .current_bundle
            .enter(machine.current, &mut machine.context.borrow_mut());
        tracing::debug!(
            initial = machine.current.name(),
            slots = machine.table.len(),
            stack_capacity = ?machine.stack_capacity(),
            "state machine started"
        );
        machine
    }

    /// The active state.
    pub fn current_state(&self) -> S {
        self.current
    }

    /// The shared context.
    pub fn context(&self) -> &Rc<RefCell<C>> {
        &self.context
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop dispatching ticks. Transitions stay available.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume dispatching ticks.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether `id` has a registered handler.
    pub fn is_registered(&self, id: S) -> bool {
        self.lookup(id).is_ok()
    }

    /// Roles of the active state's handler.
    pub fn current_roles(&self) -> Roles {
        self.current_bundle.roles()
    }

    /// Run the active state's `on_update`, unless paused.
    pub fn update(&mut self, time: FrameTime) {
        if self.paused {
            return;
        }
        self.current_bundle
            .update(&mut self.context.borrow_mut(), time);
    }

    /// Run the active state's `on_fixed_update`, unless paused.
    pub fn fixed_update(&mut self, time: FrameTime) {
        if self.paused {
            return;
        }
        self.current_bundle
            .fixed_update(&mut self.context.borrow_mut(), time);
    }

    /// Run the active state's `on_late_update`, unless paused.
    pub fn late_update(&mut self) {
        if self.paused {
            return;
        }
        self.current_bundle
            .late_update(&mut self.context.borrow_mut());
    }

    pub(crate) fn table(&self) -> &[Bundle<S, C>] {
        &self.table
    }

    pub(crate) fn removed(&self) -> &[bool] {
        &self.removed
    }

    fn lookup(&self, id: S) -> Result<&Bundle<S, C>, TransitionError> {
        let slot = index::index_of(id);
        match slot.and_then(|i| self.table.get(i)) {
            Some(bundle) if !bundle.is_empty() => Ok(bundle),
            _ => {
                let removed = slot
                    .and_then(|i| self.removed.get(i).copied())
                    .unwrap_or(false);
                Err(TransitionError::StateNotRegistered {
                    state: id.name(),
                    reason: if removed {
                        Unregistered::Removed
                    } else {
                        Unregistered::NeverRegistered
                    },
                })
            }
        }
    }
}

impl<S: StateId, C> fmt::Debug for Machine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("roles", &self.current_bundle.roles())
            .field("paused", &self.paused)
            .field("stack_depth", &self.stack_depth())
            .field("stack_capacity", &self.stack_capacity())
            .finish_non_exhaustive()
    }
}
