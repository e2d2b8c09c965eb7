use crate::errors::QuillResult;
use crate::snapshot::{ModelSnapshot, SnapshotMeta};
use crate::vocabulary::TokenId;

/// A compiled scoring backend for the model stage.
///
/// Every method is an ordinary compiled call on a concrete type; there is no
/// runtime method-name resolution. Observation stays on the history store
/// and persistence on the lifecycle manager; the backend only scores,
/// trains, and exports.
pub trait PredictionBackend: Send + Sync {
    /// Metadata for the loaded weights.
    fn meta(&self) -> SnapshotMeta;

    /// Number of context tokens `score` expects.
    fn input_len(&self) -> usize {
        self.meta().input_len
    }

    /// Vocabulary size the weights were trained against.
    fn vocab_size(&self) -> usize {
        self.meta().vocab_size
    }

    /// Score every vocabulary id given a window of exactly `input_len`
    /// context ids, left-padded with the pad id by the caller.
    ///
    /// The returned vector has exactly `vocab_size()` entries.
    fn score(&self, window: &[TokenId]) -> QuillResult<Vec<f32>>;

    /// Ingest an ordered token sequence, updating learned weights in place.
    fn train(&mut self, tokens: &[TokenId]);

    /// Export the current learned state as a transferable snapshot.
    fn export(&self) -> QuillResult<ModelSnapshot>;
}
