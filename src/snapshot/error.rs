//! Failures while encoding or decoding snapshots.

use std::fmt;
use thiserror::Error;

/// Wire format a snapshot was being written to or read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Json,
    Binary,
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Codec::Json => "JSON",
            Codec::Binary => "bincode",
        })
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Could not encode machine snapshot as {codec}: {message}")]
    Encode { codec: Codec, message: String },

    /// The input is not a snapshot of this state type.
    #[error("Could not decode machine snapshot from {codec}: {message}")]
    Decode { codec: Codec, message: String },

    #[error("Snapshot format version {found} cannot be read; this build reads version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl SnapshotError {
    pub(crate) fn encode(codec: Codec, error: impl fmt::Display) -> Self {
        Self::Encode {
            codec,
            message: error.to_string(),
        }
    }

    pub(crate) fn decode(codec: Codec, error: impl fmt::Display) -> Self {
        Self::Decode {
            codec,
            message: error.to_string(),
        }
    }

    /// Codec involved, if the failure came from one.
    pub fn codec(&self) -> Option<Codec> {
        match self {
            Self::Encode { codec, .. } | Self::Decode { codec, .. } => Some(*codec),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}
