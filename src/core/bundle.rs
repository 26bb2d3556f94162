//! Per-state capability bundles.

use crate::core::handler::{FrameTime, StateHandler};
use crate::core::roles::Roles;
use crate::core::state_id::StateId;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a registered handler.
pub type SharedHandler<S, C> = Rc<RefCell<dyn StateHandler<S, C>>>;

/// One slot of a state table: a handler together with the roles resolved
/// from it at registration.
///
/// An empty bundle marks a slot with no registered state. Cloning a bundle
/// clones the handle, not the handler.
pub struct Bundle<S: StateId, C> {
    handler: Option<SharedHandler<S, C>>,
    roles: Roles,
}

impl<S: StateId, C> Bundle<S, C> {
    pub fn empty() -> Self {
        Self {
            handler: None,
            roles: Roles::empty(),
        }
    }

    /// Resolve a bundle from a handler. `roles()` is consulted here and
    /// nowhere else.
    ///
    /// A handler with no roles resolves to an empty bundle: it cannot
    /// register a state.
    pub fn resolve(handler: SharedHandler<S, C>) -> Self {
        let roles = handler.borrow().roles();
        if roles.is_empty() {
            return Self::empty();
        }
        Self {
            handler: Some(handler),
            roles,
        }
    }

    /// Whether this slot has no registered state.
    pub fn is_empty(&self) -> bool {
        self.handler.is_none()
    }

    pub fn roles(&self) -> Roles {
        self.roles
    }

    pub fn supports(&self, role: Roles) -> bool {
        self.roles.contains(role)
    }

    #[inline]
    fn dispatch(&self, role: Roles, f: impl FnOnce(&mut (dyn StateHandler<S, C> + 'static))) -> bool {
        match &self.handler {
            Some(handler) if self.roles.contains(role) => {
                f(&mut *handler.borrow_mut());
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub(crate) fn enter(&self, from: S, context: &mut C) -> bool {
        self.dispatch(Roles::ENTER, |h| h.on_enter(from, context))
    }

    #[inline]
    pub(crate) fn exit(&self, to: S, context: &mut C) -> bool {
        self.dispatch(Roles::EXIT, |h| h.on_exit(to, context))
    }

    #[inline]
    pub(crate) fn update(&self, context: &mut C, time: FrameTime) -> bool {
        self.dispatch(Roles::UPDATE, |h| h.on_update(context, time))
    }

    #[inline]
    pub(crate) fn fixed_update(&self, context: &mut C, time: FrameTime) -> bool {
        self.dispatch(Roles::FIXED_UPDATE, |h| h.on_fixed_update(context, time))
    }

    #[inline]
    pub(crate) fn late_update(&self, context: &mut C) -> bool {
        self.dispatch(Roles::LATE_UPDATE, |h| h.on_late_update(context))
    }

    #[inline]
    pub(crate) fn suspend(&self, context: &mut C) -> bool {
        self.dispatch(Roles::SUSPEND, |h| h.on_suspend(context))
    }

    #[inline]
    pub(crate) fn resume(&self, context: &mut C) -> bool {
        self.dispatch(Roles::SUSPEND, |h| h.on_resume(context))
    }
}

impl<S: StateId, C> Clone for Bundle<S, C> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            roles: self.roles,
        }
    }
}

impl<S: StateId, C> Default for Bundle<S, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: StateId, C> fmt::Debug for Bundle<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("registered", &!self.is_empty())
            .field("roles", &self.roles)
            .finish()
    }
}
