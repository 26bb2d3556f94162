//! State handlers and the callbacks they expose.

use crate::core::roles::Roles;
use crate::core::state_id::StateId;

/// Timing values for one tick, supplied by the driving loop.
///
/// The machine never reads a clock; the caller passes whatever its loop
/// measured so runs stay deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick of the same kind.
    pub delta: f32,
    /// Accumulated scaled time in seconds.
    pub scaled: f32,
    /// Accumulated unscaled time in seconds.
    pub unscaled: f32,
}

impl FrameTime {
    pub fn new(delta: f32, scaled: f32, unscaled: f32) -> Self {
        Self {
            delta,
            scaled,
            unscaled,
        }
    }

    /// A tick of `delta` seconds with no accumulated time.
    pub fn from_delta(delta: f32) -> Self {
        Self {
            delta,
            ..Self::default()
        }
    }
}

/// Behavior attached to one (or several) states.
///
/// Every callback has an empty default. A handler states which callbacks it
/// actually wants through [`roles`](StateHandler::roles); callbacks outside
/// that set are never invoked, even if overridden.
///
/// # Example
///
/// ```rust
/// use framestate::core::{FrameTime, Roles, StateHandler};
/// use framestate::state_id;
///
/// state_id! {
///     enum Enemy: u8 {
///         Patrol,
///         Chase,
///     }
/// }
///
/// struct Patrol {
///     distance: f32,
/// }
///
/// impl StateHandler<Enemy, f32> for Patrol {
///     fn roles(&self) -> Roles {
///         Roles::ENTER | Roles::UPDATE
///     }
///
///     fn on_enter(&mut self, _from: Enemy, _speed: &mut f32) {
///         self.distance = 0.0;
///     }
///
///     fn on_update(&mut self, speed: &mut f32, time: FrameTime) {
///         self.distance += *speed * time.delta;
///     }
/// }
/// ```
pub trait StateHandler<S: StateId, C> {
    /// The callbacks this handler supports. Read once at registration.
    fn roles(&self) -> Roles;

    fn on_enter(&mut self, _from: S, _context: &mut C) {}

    fn on_exit(&mut self, _to: S, _context: &mut C) {}

    fn on_update(&mut self, _context: &mut C, _time: FrameTime) {}

    fn on_fixed_update(&mut self, _context: &mut C, _time: FrameTime) {}

    fn on_late_update(&mut self, _context: &mut C) {}

    /// Called instead of `on_exit` when the state is pushed under another.
    /// Resources needed to resume must be kept.
    fn on_suspend(&mut self, _context: &mut C) {}

    /// Called instead of `on_enter` when the state is popped back to.
    fn on_resume(&mut self, _context: &mut C) {}
}

type TransitionFn<S, C> = Box<dyn FnMut(S, &mut C)>;
type TickFn<C> = Box<dyn FnMut(&mut C, FrameTime)>;
type ContextFn<C> = Box<dyn FnMut(&mut C)>;

/// A handler assembled from closures.
///
/// Its roles are exactly the closures that were installed.
///
/// ```rust
/// use framestate::core::{Callbacks, Roles, StateHandler};
/// use framestate::state_id;
///
/// state_id! {
///     enum Screen: u8 {
///         Title,
///         Options,
///     }
/// }
///
/// let handler = Callbacks::<Screen, Vec<String>>::new()
///     .on_enter(|from, log| log.push(format!("entered from {from:?}")))
///     .on_late_update(|log| log.push("late".into()));
///
/// assert_eq!(handler.roles(), Roles::ENTER | Roles::LATE_UPDATE);
/// ```
pub struct Callbacks<S, C> {
    enter: Option<TransitionFn<S, C>>,
    exit: Option<TransitionFn<S, C>>,
    update: Option<TickFn<C>>,
    fixed_update: Option<TickFn<C>>,
    late_update: Option<ContextFn<C>>,
    suspend_resume: Option<(ContextFn<C>, ContextFn<C>)>,
}

impl<S: StateId, C> Callbacks<S, C> {
    pub fn new() -> Self {
        Self {
            enter: None,
            exit: None,
            update: None,
            fixed_update: None,
            late_update: None,
            suspend_resume: None,
        }
    }

    pub fn on_enter(mut self, f: impl FnMut(S, &mut C) + 'static) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    pub fn on_exit(mut self, f: impl FnMut(S, &mut C) + 'static) -> Self {
        self.exit = Some(Box::new(f));
        self
    }

    pub fn on_update(mut self, f: impl FnMut(&mut C, FrameTime) + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    pub fn on_fixed_update(mut self, f: impl FnMut(&mut C, FrameTime) + 'static) -> Self {
        self.fixed_update = Some(Box::new(f));
        self
    }

    pub fn on_late_update(mut self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.late_update = Some(Box::new(f));
        self
    }

    /// Install the suspend/resume pair. Neither half can be set alone.
    pub fn on_suspend_resume(
        mut self,
        suspend: impl FnMut(&mut C) + 'static,
        resume: impl FnMut(&mut C) + 'static,
    ) -> Self {
        self.suspend_resume = Some((Box::new(suspend), Box::new(resume)));
        self
    }
}

impl<S: StateId, C> Default for Callbacks<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateId, C> StateHandler<S, C> for Callbacks<S, C> {
    fn roles(&self) -> Roles {
        let mut roles = Roles::empty();
        roles.set(Roles::ENTER, self.enter.is_some());
        roles.set(Roles::EXIT, self.exit.is_some());
        roles.set(Roles::UPDATE, self.update.is_some());
        roles.set(Roles::FIXED_UPDATE, self.fixed_update.is_some());
        roles.set(Roles::LATE_UPDATE, self.late_update.is_some());
        roles.set(Roles::SUSPEND, self.suspend_resume.is_some());
        roles
    }

    fn on_enter(&mut self, from: S, context: &mut C) {
        if let Some(f) = self.enter.as_mut() {
            f(from, context);
        }
    }

    fn on_exit(&mut self, to: S, context: &mut C) {
        if let Some(f) = self.exit.as_mut() {
            f(to, context);
        }
    }

    fn on_update(&mut self, context: &mut C, time: FrameTime) {
        if let Some(f) = self.update.as_mut() {
            f(context, time);
        }
    }

    fn on_fixed_update(&mut self, context: &mut C, time: FrameTime) {
        if let Some(f) = self.fixed_update.as_mut() {
            f(context, time);
        }
    }

    fn on_late_update(&mut self, context: &mut C) {
        if let Some(f) = self.late_update.as_mut() {
            f(context);
        }
    }

    fn on_suspend(&mut self, context: &mut C) {
        if let Some((suspend, _)) = self.suspend_resume.as_mut() {
            suspend(context);
        }
    }

    fn on_resume(&mut self, context: &mut C) {
        if let Some((_, resume)) = self.suspend_resume.as_mut() {
            resume(context);
        }
    }
}
