//! Builder for constructing state machines.

use crate::builder::error::ConfigurationError;
use crate::core::{index, Bundle, StateHandler, StateId};
use crate::machine::{Machine, Parts, Stack};
use crate::pool::{BufferPool, HeapPool};
use crate::snapshot::MachineSnapshot;
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigurationError>>;

/// Builder for constructing state machines with a fluent API.
///
/// The builder owns a scratch state table rented from a [`BufferPool`]. The
/// table goes back to the pool exactly once: when [`build`](Self::build)
/// runs, or when the builder is dropped.
///
/// # Example
///
/// ```rust
/// use framestate::builder::MachineBuilder;
/// use framestate::core::Callbacks;
/// use framestate::state_id;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// state_id! {
///     enum Door: u8 {
///         Closed,
///         Open,
///     }
/// }
///
/// let opened = Rc::new(RefCell::new(0u32));
/// let mut door = MachineBuilder::create()?
///     .with(Door::Closed, Callbacks::new().on_exit(|_, _: &mut u32| {}))
///     .with(Door::Open, Callbacks::new().on_enter(|_, count: &mut u32| *count += 1))
///     .with_context(opened.clone())
///     .build()?;
///
/// door.go_to(Door::Open)?;
/// assert_eq!(*opened.borrow(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MachineBuilder<S: StateId, C> {
    pool: Rc<dyn BufferPool<Bundle<S, C>>>,
    table: Option<Vec<Bundle<S, C>>>,
    removed: Vec<bool>,
    context: Option<Rc<RefCell<C>>>,
    initial: Option<S>,
    initial_explicit: bool,
    stack_capacity: Option<usize>,
    undeclared: Option<S>,
    paused: bool,
    suspended: Vec<S>,
}

impl<S: StateId, C: 'static> MachineBuilder<S, C> {
    /// Create an empty builder whose table is sized for every declared `S`.
    pub fn create() -> Result<Self, ConfigurationError> {
        Self::create_in(Rc::new(HeapPool))
    }

    /// Like [`create`](Self::create), renting the table from `pool`.
    pub fn create_in(pool: Rc<dyn BufferPool<Bundle<S, C>>>) -> Result<Self, ConfigurationError> {
        let len = index::table_len::<S>()?;
        let mut table = pool.rent(len);
        table.clear();
        table.resize_with(len, Bundle::empty);
        Ok(Self::seeded(pool, table, vec![false; len]))
    }

    /// Start a new builder from an existing machine's configuration.
    ///
    /// The state table, removal history, context and stack capacity are
    /// copied. The machine's current state becomes the default initial
    /// state. Changes made through the builder never reach `machine`.
    pub fn derive(machine: &Machine<S, C>) -> Self {
        Self::derive_in(machine, Rc::new(HeapPool))
    }

    /// Like [`derive`](Self::derive), renting the table from `pool`.
    pub fn derive_in(machine: &Machine<S, C>, pool: Rc<dyn BufferPool<Bundle<S, C>>>) -> Self {
        let source = machine.table();
        let mut table = pool.rent(source.len());
        table.clear();
        table.extend(source.iter().cloned());

        let mut builder = Self::seeded(pool, table, machine.removed().to_vec());
        builder.context = Some(Rc::clone(machine.context()));
        builder.initial = Some(machine.current_state());
        builder.stack_capacity = machine.stack_capacity();
        tracing::debug!(
            current = machine.current_state().name(),
            "derived builder from machine"
        );
        builder
    }

    fn seeded(
        pool: Rc<dyn BufferPool<Bundle<S, C>>>,
        table: Vec<Bundle<S, C>>,
        removed: Vec<bool>,
    ) -> Self {
        Self {
            pool,
            table: Some(table),
            removed,
            context: None,
            initial: None,
            initial_explicit: false,
            stack_capacity: None,
            undeclared: None,
            paused: false,
            suspended: Vec::new(),
        }
    }

    /// Register `handler` for `id`, replacing any previous registration.
    pub fn with<H>(self, id: S, handler: H) -> Self
    where
        H: StateHandler<S, C> + 'static,
    {
        self.with_shared(id, Rc::new(RefCell::new(handler)))
    }

    /// Register a handler the caller keeps a handle to, or one shared by
    /// several states.
    pub fn with_shared<H>(mut self, id: S, handler: Rc<RefCell<H>>) -> Self
    where
        H: StateHandler<S, C> + 'static,
    {
        let bundle = Bundle::resolve(handler);
        let Some(slot) = self.slot(id) else {
            self.undeclared.get_or_insert(id);
            return self;
        };

        if bundle.is_empty() {
            tracing::debug!(state = id.name(), "handler has no roles; state left unregistered");
        } else {
            tracing::trace!(state = id.name(), roles = ?bundle.roles(), "registered state");
            if self.initial.is_none() {
                self.initial = Some(id);
            }
        }
        if let Some(table) = self.table.as_mut() {
            table[slot] = bundle;
        }
        self.removed[slot] = false;
        self
    }

    /// Unregister `id`. Transitions to it will report it as removed.
    pub fn without(mut self, id: S) -> Self {
        if let Some(slot) = self.slot(id) {
            if let Some(table) = self.table.as_mut() {
                table[slot] = Bundle::empty();
            }
            self.removed[slot] = true;
            tracing::trace!(state = id.name(), "removed state");
        }
        if !self.initial_explicit && self.initial == Some(id) {
            self.initial = None;
        }
        self
    }

    /// Set the shared context (required).
    pub fn with_context(mut self, context: Rc<RefCell<C>>) -> Self {
        self.context = Some(context);
        self
    }

    /// Choose the state the machine starts in. Defaults to the first
    /// registered state.
    pub fn with_initial_state(mut self, id: S) -> Self {
        self.initial = Some(id);
        self.initial_explicit = true;
        self
    }

    /// Give the machine a suspend/resume stack holding up to `capacity`
    /// states.
    pub fn with_stack(mut self, capacity: usize) -> Self {
        self.stack_capacity = Some(capacity);
        self
    }

    pub fn without_stack(mut self) -> Self {
        self.stack_capacity = None;
        self
    }

    /// Resume from a snapshot: its current state becomes the initial state,
    /// its pause flag is kept and its suspended states are placed back on
    /// the stack without callbacks.
    pub fn restore(mut self, snapshot: &MachineSnapshot<S>) -> Self {
        self.initial = Some(snapshot.current);
        self.initial_explicit = true;
        self.paused = snapshot.paused;
        self.suspended = snapshot.suspended.clone();
        self
    }

    /// Check every precondition of [`build`](Self::build), collecting all
    /// failures.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigurationError>> {
        let mut checks: Vec<Check> = Vec::new();

        if let Some(id) = self.undeclared {
            checks.push(Validation::fail(ConfigurationError::UndeclaredState {
                state: id.name(),
                len: self.len(),
            }));
        }

        checks.push(require(
            self.bundles().iter().any(|b| !b.is_empty()),
            || ConfigurationError::NoStatesRegistered,
        ));
        checks.push(require(self.context.is_some(), || {
            ConfigurationError::MissingContext
        }));
        checks.push(require(self.stack_capacity != Some(0), || {
            ConfigurationError::ZeroStackCapacity
        }));

        if let Some(initial) = self.resolve_initial() {
            checks.push(self.check_initial(initial));
        }
        checks.push(self.check_suspended());

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the machine and enter its initial state.
    ///
    /// Fails with the first unmet precondition; every unmet precondition is
    /// logged.
    pub fn build(mut self) -> Result<Machine<S, C>, ConfigurationError> {
        if let Validation::Failure(issues) = self.validate() {
            for issue in issues.iter() {
                tracing::warn!(%issue, "rejected machine configuration");
            }
            if let Some(issue) = issues.iter().next() {
                return Err(issue.clone());
            }
        }

        let context = self
            .context
            .take()
            .ok_or(ConfigurationError::MissingContext)?;
        let initial = self
            .resolve_initial()
            .ok_or(ConfigurationError::NoStatesRegistered)?;

        let mut scratch = self.table.take().unwrap_or_default();
        let table: Box<[Bundle<S, C>]> = scratch.drain(..).collect();
        self.pool.give_back(scratch);

        let initial_bundle = index::index_of(initial)
            .and_then(|slot| table.get(slot))
            .filter(|bundle| !bundle.is_empty())
            .cloned()
            .ok_or(ConfigurationError::InitialStateUnregistered {
                state: initial.name(),
            })?;

        let stack = match self.stack_capacity {
            Some(capacity) => {
                let mut stack = Stack::with_capacity(capacity);
                for &id in &self.suspended {
                    let bundle = index::index_of(id)
                        .and_then(|slot| table.get(slot))
                        .filter(|bundle| !bundle.is_empty() && !stack.is_full())
                        .cloned()
                        .ok_or_else(|| ConfigurationError::SnapshotMismatch {
                            reason: format!("suspended state '{}' cannot be restored", id.name()),
                        })?;
                    stack.push(id, bundle);
                }
                Some(stack)
            }
            None => None,
        };

        Ok(Machine::start(Parts {
            table,
            removed: mem::take(&mut self.removed).into_boxed_slice(),
            initial,
            initial_bundle,
            context,
            paused: self.paused,
            stack,
        }))
    }

    fn len(&self) -> usize {
        self.removed.len()
    }

    fn bundles(&self) -> &[Bundle<S, C>] {
        self.table.as_deref().unwrap_or_default()
    }

    fn slot(&self, id: S) -> Option<usize> {
        index::index_of(id).filter(|&slot| slot < self.len())
    }

    fn is_registered(&self, id: S) -> bool {
        self.slot(id)
            .and_then(|slot| self.bundles().get(slot))
            .is_some_and(|bundle| !bundle.is_empty())
    }

    /// The explicit or first-registered initial state, falling back to the
    /// registered state with the lowest index.
    fn resolve_initial(&self) -> Option<S> {
        self.initial.or_else(|| {
            S::ALL
                .iter()
                .copied()
                .filter(|&id| self.is_registered(id))
                .min_by_key(|&id| index::index_of(id))
        })
    }

    fn check_initial(&self, initial: S) -> Check {
        match self.slot(initial) {
            None => Validation::fail(ConfigurationError::InitialStateOutOfRange {
                state: initial.name(),
                index: index::index_of(initial),
                len: self.len(),
            }),
            Some(_) if !self.is_registered(initial) => {
                Validation::fail(ConfigurationError::InitialStateUnregistered {
                    state: initial.name(),
                })
            }
            Some(_) => Validation::success(()),
        }
    }

    fn check_suspended(&self) -> Check {
        if self.suspended.is_empty() {
            return Validation::success(());
        }
        let reason = match self.stack_capacity {
            None => Some(format!(
                "{} suspended states but the stack is disabled",
                self.suspended.len()
            )),
            Some(capacity) if self.suspended.len() > capacity => Some(format!(
                "{} suspended states exceed stack capacity {capacity}",
                self.suspended.len()
            )),
            Some(_) => self
                .suspended
                .iter()
                .find(|&&id| !self.is_registered(id))
                .map(|id| format!("suspended state '{}' is not registered", id.name())),
        };
        match reason {
            Some(reason) => Validation::fail(ConfigurationError::SnapshotMismatch { reason }),
            None => Validation::success(()),
        }
    }
}

fn require(ok: bool, error: impl FnOnce() -> ConfigurationError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

impl<S: StateId, C: 'static> From<&Machine<S, C>> for MachineBuilder<S, C> {
    fn from(machine: &Machine<S, C>) -> Self {
        Self::derive(machine)
    }
}

impl<S: StateId, C> Drop for MachineBuilder<S, C> {
    fn drop(&mut self) {
        if let Some(table) = self.table.take() {
            self.pool.give_back(table);
        }
    }
}
