//! Error types for engine construction and the model inference stage.

/// Errors raised while building or running a prediction engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The vocabulary file could not be read.
    #[error("vocabulary load failed: {path}: {reason}")]
    VocabularyLoad {
        /// Path that was being loaded.
        path: String,
        /// Underlying failure description.
        reason: String,
    },

    /// The snapshot was trained against a different vocabulary size.
    #[error("vocabulary size mismatch: snapshot has {snapshot}, runtime has {runtime}")]
    VocabularyMismatch {
        /// Vocabulary size recorded in the snapshot metadata.
        snapshot: usize,
        /// Size of the live vocabulary.
        runtime: usize,
    },

    /// The backend failed at inference time or returned a malformed vector.
    #[error("inference failed: {0}")]
    InferenceFailed(String),

    /// No model backend is loaded; only the fallback stage is available.
    #[error("no model backend loaded")]
    BackendUnavailable,
}
