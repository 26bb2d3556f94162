//! Direct transitions: `go_to` and `reenter`.

use super::{Machine, TransitionError};
use crate::core::StateId;

impl<S: StateId, C> Machine<S, C> {
    /// Transition to `next`.
    ///
    /// The active state's `on_exit(next)` runs, then `next` becomes current
    /// and its `on_enter(previous)` runs. Going to the current state is a
    /// no-op. If `next` has no handler the machine is left untouched.
    pub fn go_to(&mut self, next: S) -> Result<(), TransitionError> {
        if next == self.current {
            return Ok(());
        }
        let bundle = self.lookup(next)?.clone();

        let previous = self.current;
        let mut context = self.context.borrow_mut();
        self.current_bundle.exit(next, &mut context);
        self.current = next;
        self.current_bundle = bundle;
        self.current_bundle.enter(previous, &mut context);

        tracing::trace!(from = previous.name(), to = next.name(), "go_to");
        Ok(())
    }

    /// Exit and re-enter the active state, passing it as both source and
    /// target.
    pub fn reenter(&mut self) {
        let current = self.current;
        let mut context = self.context.borrow_mut();
        self.current_bundle.exit(current, &mut context);
        self.current_bundle.enter(current, &mut context);

        tracing::trace!(state = current.name(), "reenter");
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::MachineBuilder;
    use crate::core::Roles;
    use crate::machine::testing::*;
    use crate::machine::{Machine, TransitionError, Unregistered};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn machine(log: &Log) -> Machine<Flow, u32> {
        MachineBuilder::create()
            .unwrap()
            .with(Flow::Title, Recorder::new(Flow::Title, Roles::LIFECYCLE, log))
            .with(Flow::Play, Recorder::new(Flow::Play, Roles::LIFECYCLE, log))
            .with(Flow::Shop, Recorder::new(Flow::Shop, Roles::ENTER, log))
            .with_context(Rc::new(RefCell::new(0)))
            .build()
            .unwrap()
    }

    #[test]
    fn go_to_exits_then_enters() {
        let log = new_log();
        let mut machine = machine(&log);
        take(&log);

        machine.go_to(Flow::Play).unwrap();

        assert_eq!(machine.current_state(), Flow::Play);
        assert_eq!(take(&log), ["Title.exit(Play)", "Play.enter(Title)"]);
    }

    #[test]
    fn go_to_current_state_is_suppressed() {
        let log = new_log();
        let mut machine = machine(&log);
        take(&log);

        machine.go_to(Flow::Title).unwrap();

        assert_eq!(machine.current_state(), Flow::Title);
        assert!(take(&log).is_empty());
    }

    #[test]
    fn missing_roles_are_skipped() {
        let log = new_log();
        let mut machine = machine(&log);
        machine.go_to(Flow::Shop).unwrap();
        take(&log);

        machine.go_to(Flow::Play).unwrap();

        assert_eq!(take(&log), ["Play.enter(Shop)"]);
    }

    #[test]
    fn go_to_unregistered_state_fails_without_effect() {
        let log = new_log();
        let mut machine = machine(&log);
        take(&log);

        let err = machine.go_to(Flow::Inventory).unwrap_err();

        assert_eq!(
            err,
            TransitionError::StateNotRegistered {
                state: "Inventory",
                reason: Unregistered::NeverRegistered,
            }
        );
        assert_eq!(machine.current_state(), Flow::Title);
        assert!(take(&log).is_empty());
    }

    #[test]
    fn reenter_passes_current_state_both_ways() {
        let log = new_log();
        let mut machine = machine(&log);
        machine.go_to(Flow::Play).unwrap();
        take(&log);

        machine.reenter();

        assert_eq!(machine.current_state(), Flow::Play);
        assert_eq!(take(&log), ["Play.exit(Play)", "Play.enter(Play)"]);
    }

    #[test]
    fn transitions_work_while_paused() {
        let log = new_log();
        let mut machine = machine(&log);
        machine.pause();
        take(&log);

        machine.go_to(Flow::Play).unwrap();
        machine.reenter();

        assert!(machine.is_paused());
        assert_eq!(take(&log).len(), 4);
    }
}
