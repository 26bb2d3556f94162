//! Property-based tests for machine transitions.
//!
//! These tests use proptest to drive machines with random operation
//! sequences and compare every callback against a small reference model.

use framestate::core::{FrameTime, Roles, StateHandler, StateId};
use framestate::{state_id, Machine, MachineBuilder, TransitionError, Unregistered};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

state_id! {
    enum Ai: u8 {
        Idle,
        Patrol,
        Chase,
        Flee,
        Dead,
    }
}

const CAPACITY: usize = 3;

fn roles_of(id: Ai) -> Option<Roles> {
    match id {
        Ai::Idle => Some(Roles::LIFECYCLE | Roles::UPDATE | Roles::SUSPEND),
        Ai::Patrol => Some(Roles::LIFECYCLE | Roles::UPDATE),
        Ai::Chase => Some(Roles::all()),
        Ai::Flee => Some(Roles::ENTER),
        Ai::Dead => None,
    }
}

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    id: Ai,
    log: Log,
}

impl StateHandler<Ai, ()> for Recorder {
    fn roles(&self) -> Roles {
        roles_of(self.id).unwrap_or_default()
    }

    fn on_enter(&mut self, from: Ai, _: &mut ()) {
        self.log
            .borrow_mut()
            .push(format!("{}.enter({})", self.id.name(), from.name()));
    }

    fn on_exit(&mut self, to: Ai, _: &mut ()) {
        self.log
            .borrow_mut()
            .push(format!("{}.exit({})", self.id.name(), to.name()));
    }

    fn on_update(&mut self, _: &mut (), _: FrameTime) {
        self.log.borrow_mut().push(format!("{}.update", self.id.name()));
    }

    fn on_suspend(&mut self, _: &mut ()) {
        self.log.borrow_mut().push(format!("{}.suspend", self.id.name()));
    }

    fn on_resume(&mut self, _: &mut ()) {
        self.log.borrow_mut().push(format!("{}.resume", self.id.name()));
    }
}

fn build(log: &Log, initial: Ai) -> Machine<Ai, ()> {
    let mut builder = MachineBuilder::create().unwrap();
    for &id in Ai::ALL {
        if roles_of(id).is_some() {
            builder = builder.with(
                id,
                Recorder {
                    id,
                    log: Rc::clone(log),
                },
            );
        }
    }
    builder
        .with_initial_state(initial)
        .with_context(Rc::new(RefCell::new(())))
        .with_stack(CAPACITY)
        .build()
        .unwrap()
}

fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

#[derive(Clone, Debug)]
enum Op {
    GoTo(Ai),
    Push(Ai),
    Pop,
    Reenter,
    Update,
    Pause,
    Resume,
}

/// Expected behavior, written out longhand.
struct Model {
    current: Ai,
    stack: Vec<Ai>,
    paused: bool,
}

impl Model {
    fn has(id: Ai, role: Roles) -> bool {
        roles_of(id).is_some_and(|r| r.contains(role))
    }

    fn apply(&mut self, op: &Op) -> (Vec<String>, bool) {
        let mut events = Vec::new();
        let cur = self.current;
        match *op {
            Op::GoTo(next) => {
                if next == cur {
                    return (events, true);
                }
                if roles_of(next).is_none() {
                    return (events, false);
                }
                if Self::has(cur, Roles::EXIT) {
                    events.push(format!("{}.exit({})", cur.name(), next.name()));
                }
                if Self::has(next, Roles::ENTER) {
                    events.push(format!("{}.enter({})", next.name(), cur.name()));
                }
                self.current = next;
            }
            Op::Push(next) => {
                if self.stack.len() == CAPACITY || roles_of(next).is_none() {
                    return (events, false);
                }
                if Self::has(cur, Roles::SUSPEND) {
                    events.push(format!("{}.suspend", cur.name()));
                } else if Self::has(cur, Roles::EXIT) {
                    events.push(format!("{}.exit({})", cur.name(), next.name()));
                }
                self.stack.push(cur);
                if Self::has(next, Roles::ENTER) {
                    events.push(format!("{}.enter({})", next.name(), cur.name()));
                }
                self.current = next;
            }
            Op::Pop => {
                let Some(restored) = self.stack.pop() else {
                    return (events, true);
                };
                if Self::has(cur, Roles::EXIT) {
                    events.push(format!("{}.exit({})", cur.name(), restored.name()));
                }
                if Self::has(restored, Roles::SUSPEND) {
                    events.push(format!("{}.resume", restored.name()));
                } else if Self::has(restored, Roles::ENTER) {
                    events.push(format!("{}.enter({})", restored.name(), cur.name()));
                }
                self.current = restored;
            }
            Op::Reenter => {
                if Self::has(cur, Roles::EXIT) {
                    events.push(format!("{}.exit({})", cur.name(), cur.name()));
                }
                if Self::has(cur, Roles::ENTER) {
                    events.push(format!("{}.enter({})", cur.name(), cur.name()));
                }
            }
            Op::Update => {
                if !self.paused && Self::has(cur, Roles::UPDATE) {
                    events.push(format!("{}.update", cur.name()));
                }
            }
            Op::Pause => self.paused = true,
            Op::Resume => self.paused = false,
        }
        (events, true)
    }
}

fn run(machine: &mut Machine<Ai, ()>, op: &Op) -> bool {
    match *op {
        Op::GoTo(next) => machine.go_to(next).is_ok(),
        Op::Push(next) => machine.push(next).is_ok(),
        Op::Pop => machine.pop().is_ok(),
        Op::Reenter => {
            machine.reenter();
            true
        }
        Op::Update => {
            machine.update(FrameTime::from_delta(0.016));
            true
        }
        Op::Pause => {
            machine.pause();
            true
        }
        Op::Resume => {
            machine.resume();
            true
        }
    }
}

prop_compose! {
    fn arbitrary_state()(variant in 0..5u8) -> Ai {
        Ai::ALL[variant as usize]
    }
}

prop_compose! {
    fn registered_state()(variant in 0..4u8) -> Ai {
        Ai::ALL[variant as usize]
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arbitrary_state().prop_map(Op::GoTo),
        3 => arbitrary_state().prop_map(Op::Push),
        3 => Just(Op::Pop),
        1 => Just(Op::Reenter),
        2 => Just(Op::Update),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
    ]
}

proptest! {
    #[test]
    fn machine_matches_reference_model(
        initial in registered_state(),
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = build(&log, initial);
        let mut model = Model { current: initial, stack: Vec::new(), paused: false };

        let entered = take(&log);
        if Model::has(initial, Roles::ENTER) {
            prop_assert_eq!(entered, vec![format!("{}.enter({})", initial.name(), initial.name())]);
        } else {
            prop_assert!(entered.is_empty());
        }

        for op in &ops {
            let (expected, ok) = model.apply(op);
            prop_assert_eq!(run(&mut machine, op), ok, "{:?}", op);
            prop_assert_eq!(take(&log), expected, "{:?}", op);
            prop_assert_eq!(machine.current_state(), model.current);
            prop_assert_eq!(machine.stack_depth(), model.stack.len());
            prop_assert!(machine.stack_depth() <= CAPACITY);
            prop_assert_eq!(machine.is_paused(), model.paused);
            prop_assert_eq!(machine.suspended_states().collect::<Vec<_>>(), model.stack.clone());
        }
    }

    #[test]
    fn go_to_current_state_fires_nothing(state in registered_state()) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = build(&log, state);
        take(&log);

        prop_assert!(machine.go_to(state).is_ok());
        prop_assert!(take(&log).is_empty());
        prop_assert_eq!(machine.current_state(), state);
    }

    #[test]
    fn unregistered_target_reports_never_registered(state in registered_state()) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = build(&log, state);
        take(&log);

        let err = machine.go_to(Ai::Dead).unwrap_err();
        prop_assert_eq!(err.unregistered(), Some(Unregistered::NeverRegistered));
        prop_assert_eq!(machine.push(Ai::Dead).unwrap_err().unregistered(), Some(Unregistered::NeverRegistered));
        prop_assert!(take(&log).is_empty());
        prop_assert_eq!(machine.current_state(), state);
    }

    #[test]
    fn pushing_past_capacity_overflows(targets in prop::collection::vec(registered_state(), CAPACITY + 1)) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = build(&log, Ai::Idle);

        for target in &targets[..CAPACITY] {
            prop_assert!(machine.push(*target).is_ok());
        }
        let before = machine.current_state();
        take(&log);

        prop_assert_eq!(
            machine.push(targets[CAPACITY]),
            Err(TransitionError::StackOverflow { capacity: CAPACITY })
        );
        prop_assert_eq!(machine.current_state(), before);
        prop_assert_eq!(machine.stack_depth(), CAPACITY);
        prop_assert!(take(&log).is_empty());
    }

    #[test]
    fn state_roundtrip_serialization(state in arbitrary_state()) {
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: Ai = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(state, deserialized);
    }
}
