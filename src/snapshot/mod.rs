//! Snapshots of a running machine's position.
//!
//! A snapshot records which state is active, whether ticks are paused and
//! which states are suspended on the stack. Handlers and the context are
//! not part of it; they are re-supplied through a builder, which can then
//! [`restore`](crate::builder::MachineBuilder::restore) the snapshot.

use crate::core::StateId;
use crate::machine::Machine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::{Codec, SnapshotError};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable record of a machine's position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot<S> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Active state
    pub current: S,

    /// Whether ticks were paused
    pub paused: bool,

    /// Suspended states, oldest first
    pub suspended: Vec<S>,
}

impl<S: StateId + Serialize + DeserializeOwned> MachineSnapshot<S> {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::encode(Codec::Json, e))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::decode(Codec::Json, e))?;
        snapshot.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::encode(Codec::Binary, e))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::decode(Codec::Binary, e))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<S: StateId, C> Machine<S, C> {
    /// Record the machine's current position.
    pub fn snapshot(&self) -> MachineSnapshot<S> {
        MachineSnapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            current: self.current_state(),
            paused: self.is_paused(),
            suspended: self.suspended_states().collect(),
        }
    }
}
