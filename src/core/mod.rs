//! Core state machine types.
//!
//! This module contains the building blocks a machine is assembled from:
//! - State identifiers via the `StateId` trait, and their dense indices
//! - Handlers and the callback roles they opt into
//! - Capability bundles, the resolved per-state dispatch record

mod bundle;
mod handler;
pub mod index;
mod roles;
mod state_id;

pub use bundle::{Bundle, SharedHandler};
pub use handler::{Callbacks, FrameTime, StateHandler};
pub use roles::Roles;
pub use state_id::{Discriminant, StateId};
