//! Error taxonomy for the Quill prediction system.
//!
//! Each subsystem gets its own `thiserror` enum; `QuillError` unifies them at
//! the crate boundary. Failures are values, not control flow: every external
//! call site (inference, transport, storage) reports through `QuillResult`.

mod engine_error;
mod snapshot_error;
mod sync_error;

pub use engine_error::EngineError;
pub use snapshot_error::SnapshotError;
pub use sync_error::SyncError;

/// Convenience alias used across all quill crates.
pub type QuillResult<T> = Result<T, QuillError>;

/// Top-level error wrapping each subsystem's taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum QuillError {
    /// Engine construction or inference failure.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Snapshot envelope validation or decode failure.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Transport or sync-cycle failure.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Config file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
