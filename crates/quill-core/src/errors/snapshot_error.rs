//! Error types for the snapshot envelope.

/// Errors raised while encoding or decoding a model snapshot.
///
/// A snapshot that fails any of these checks is never applied; the live
/// engine is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The transfer body was empty.
    #[error("empty snapshot body")]
    Empty,

    /// The envelope carries a format version this build does not understand.
    #[error("unsupported snapshot format version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the envelope.
        found: u16,
        /// Version this build supports.
        supported: u16,
    },

    /// The payload hash does not match the envelope checksum.
    #[error("snapshot checksum mismatch")]
    ChecksumMismatch,

    /// The envelope or payload bytes could not be deserialized.
    #[error("snapshot decode failed: {0}")]
    Decode(String),

    /// The snapshot could not be serialized for transfer.
    #[error("snapshot encode failed: {0}")]
    Encode(String),
}
