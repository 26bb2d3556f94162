//! Framestate: a finite state machine core for per-frame simulations
//!
//! Framestate drives game flow, AI behavior and UI navigation from inside a
//! frame loop. Dispatch goes straight to the active state's callbacks; once
//! a machine is built, no operation allocates.
//!
//! # Core Concepts
//!
//! - **State ids**: a closed set of identifiers mapped to dense table slots
//! - **Handlers**: objects that opt into only the callbacks they need
//! - **Machine**: direct transitions, re-entry, an optional suspend/resume
//!   stack and pausable ticks
//! - **Builder**: validated construction, and derivation of modified copies
//!
//! # Example
//!
//! ```rust
//! use framestate::{state_id, Callbacks, FrameTime, MachineBuilder};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! state_id! {
//!     enum Game: u8 {
//!         Title,
//!         Playing,
//!         Inventory,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct World {
//!     elapsed: f32,
//!     menu_opened: u32,
//! }
//!
//! let world = Rc::new(RefCell::new(World::default()));
//! let mut game = MachineBuilder::create()?
//!     .with(Game::Title, Callbacks::new().on_exit(|_, _: &mut World| {}))
//!     .with(
//!         Game::Playing,
//!         Callbacks::new()
//!             .on_update(|w: &mut World, t| w.elapsed += t.delta)
//!             .on_suspend_resume(|_| {}, |_| {}),
//!     )
//!     .with(
//!         Game::Inventory,
//!         Callbacks::new().on_enter(|_, w: &mut World| w.menu_opened += 1),
//!     )
//!     .with_context(world.clone())
//!     .with_stack(2)
//!     .build()?;
//!
//! game.go_to(Game::Playing)?;
//! game.update(FrameTime::from_delta(0.5));
//! game.push(Game::Inventory)?;
//! game.update(FrameTime::from_delta(0.5));
//! game.pop()?;
//!
//! assert_eq!(game.current_state(), Game::Playing);
//! assert_eq!(world.borrow().elapsed, 0.5);
//! assert_eq!(world.borrow().menu_opened, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

extern crate self as framestate;

pub mod builder;
pub mod core;
pub mod machine;
pub mod pool;
pub mod snapshot;

// Re-export commonly used types
pub use crate::builder::{ConfigurationError, MachineBuilder};
pub use crate::core::{Callbacks, FrameTime, Roles, StateHandler, StateId};
pub use crate::machine::{Machine, TransitionError, Unregistered};
pub use crate::snapshot::{Codec, MachineSnapshot, SnapshotError};

#[doc(hidden)]
pub use serde;
