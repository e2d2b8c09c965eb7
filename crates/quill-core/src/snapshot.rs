//! Versioned, checksummed envelope for transferable learned state.
//!
//! The payload is opaque to everything but the backend that produced it; the
//! envelope carries the metadata needed to validate a snapshot against the
//! runtime before any weights are trusted: format version, the context
//! window the model expects, the vocabulary size the weights were trained
//! against, and a blake3 checksum of the payload.

use serde::{Deserialize, Serialize};

use crate::errors::{QuillResult, SnapshotError};

/// Current snapshot wire format version.
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;

/// Metadata describing the weights in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Number of context tokens the model expects.
    pub input_len: usize,
    /// Vocabulary size the weights were trained against.
    pub vocab_size: usize,
}

/// Opaque serialized learned state plus its envelope metadata.
///
/// Snapshots are transient: created for export, consumed for a swap, and
/// discarded. Export then load must reproduce equivalent prediction
/// behavior for the same inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Wire format version; anything but the current version is rejected.
    pub format_version: u16,
    /// Validation metadata for the payload.
    pub meta: SnapshotMeta,
    payload: Vec<u8>,
    checksum: [u8; 32],
}

impl ModelSnapshot {
    /// Wrap a backend payload in a checksummed envelope.
    pub fn new(meta: SnapshotMeta, payload: Vec<u8>) -> Self {
        let checksum = *blake3::hash(&payload).as_bytes();
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            meta,
            payload,
            checksum,
        }
    }

    /// The backend-owned payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serialize the whole envelope for transfer.
    pub fn encode(&self) -> QuillResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()).into())
    }

    /// Deserialize and validate a transferred envelope.
    ///
    /// Rejects empty bodies, undecodable bytes, unsupported versions, and
    /// checksum mismatches. A snapshot that fails here is never applied.
    pub fn decode(bytes: &[u8]) -> QuillResult<Self> {
        if bytes.is_empty() {
            return Err(SnapshotError::Empty.into());
        }
        let snapshot: ModelSnapshot =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))?;
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.format_version,
                supported: SNAPSHOT_FORMAT_VERSION,
            }
            .into());
        }
        if blake3::hash(&snapshot.payload).as_bytes() != &snapshot.checksum {
            return Err(SnapshotError::ChecksumMismatch.into());
        }
        Ok(snapshot)
    }
}
