//! Hybrid prediction engine: model stage with degeneracy-guarded fallback.

use std::sync::Arc;

use quill_core::config::EngineConfig;
use quill_core::errors::{EngineError, QuillResult};
use quill_core::snapshot::ModelSnapshot;
use quill_core::traits::PredictionBackend;
use quill_core::vocabulary::Vocabulary;

use crate::history::UserHistoryStore;
use crate::ngram::NgramBackend;
use crate::stages::{FallbackStage, ModelStage};
use crate::text;

/// An immutable prediction engine instance.
///
/// Engines are never mutated in place: a newer model becomes live only
/// through a whole-engine swap in [`LivePredictor`](crate::live::LivePredictor).
pub struct PredictionEngine {
    vocab: Arc<Vocabulary>,
    backend: Option<Box<dyn PredictionBackend>>,
    config: EngineConfig,
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("vocab_len", &self.vocab.len())
            .field("has_backend", &self.backend.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl PredictionEngine {
    /// An engine with no model stage; the fallback stage carries everything.
    ///
    /// This is the permanent degraded mode after an initialization failure.
    pub fn fallback_only(vocab: Arc<Vocabulary>, config: EngineConfig) -> Self {
        Self {
            vocab,
            backend: None,
            config,
        }
    }

    /// An engine over a loaded backend.
    ///
    /// The backend's vocabulary size must match the live vocabulary, or the
    /// model stage could emit ids the vocabulary cannot resolve.
    pub fn with_backend(
        vocab: Arc<Vocabulary>,
        backend: Box<dyn PredictionBackend>,
        config: EngineConfig,
    ) -> QuillResult<Self> {
        if backend.vocab_size() != vocab.len() {
            return Err(EngineError::VocabularyMismatch {
                snapshot: backend.vocab_size(),
                runtime: vocab.len(),
            }
            .into());
        }
        Ok(Self {
            vocab,
            backend: Some(backend),
            config,
        })
    }

    /// Build an engine from a validated snapshot envelope.
    pub fn from_snapshot(
        vocab: Arc<Vocabulary>,
        snapshot: &ModelSnapshot,
        config: EngineConfig,
    ) -> QuillResult<Self> {
        let backend = NgramBackend::from_snapshot(snapshot)?;
        Self::with_backend(vocab, Box::new(backend), config)
    }

    /// Whether a model backend is loaded.
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// The vocabulary this engine predicts over.
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// Export the backend's learned state.
    pub fn export(&self) -> QuillResult<ModelSnapshot> {
        match &self.backend {
            Some(backend) => backend.export(),
            None => Err(EngineError::BackendUnavailable.into()),
        }
    }

    /// Predict up to `max_suggestions` distinct next words for a context.
    ///
    /// Pure with respect to all inputs; prediction never observes. The
    /// model stage runs first; if fewer than two distinct words survive its
    /// epsilon cut the stage is treated as uninformative (a cold model, or a
    /// context far outside the training distribution) and the fallback stage
    /// answers instead. Never panics, never returns an error.
    pub fn predict(
        &self,
        context: &str,
        history: &UserHistoryStore,
        max_suggestions: usize,
    ) -> Vec<String> {
        if max_suggestions == 0 {
            return Vec::new();
        }

        let tokens = text::normalize(context);

        // The degeneracy check needs at least two ranked candidates.
        let k = max_suggestions.max(2);
        let mut suggestions = match &self.backend {
            Some(backend) => ModelStage::run(
                backend.as_ref(),
                &self.vocab,
                &tokens,
                k,
                self.config.score_epsilon,
            ),
            None => Vec::new(),
        };
        dedup_in_place(&mut suggestions);

        if suggestions.len() < 2 {
            let last = tokens.last().map(String::as_str);
            suggestions = FallbackStage::run(history, last, max_suggestions);
            dedup_in_place(&mut suggestions);
        }

        suggestions.truncate(max_suggestions);
        suggestions
    }
}

/// Drop later duplicates, keeping first-seen order.
fn dedup_in_place(words: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    words.retain(|word| seen.insert(word.clone()));
}
