//! Model inference stage: context tokens → backend scores → top-k words.

use std::cmp::Ordering;

use quill_core::traits::PredictionBackend;
use quill_core::vocabulary::{TokenId, Vocabulary, PAD_TOKEN_ID};

/// The neural/statistical half of the hybrid engine.
pub struct ModelStage;

impl ModelStage {
    /// Run the backend over normalized context tokens.
    ///
    /// Maps words to ids (unknown → pad), left-pads the window, scores, then
    /// keeps the top `k` ids at or above `epsilon`. Ties break by ascending
    /// id; the pad id is never emitted. Any backend error yields an empty
    /// result; the engine treats that as a degenerate stage and falls back.
    pub fn run(
        backend: &dyn PredictionBackend,
        vocab: &Vocabulary,
        tokens: &[String],
        k: usize,
        epsilon: f32,
    ) -> Vec<String> {
        let input_len = backend.input_len();
        if input_len == 0 || k == 0 {
            return Vec::new();
        }

        let mut window = vec![PAD_TOKEN_ID; input_len];
        let tail = tokens.len().min(input_len);
        for (slot, word) in window[input_len - tail..]
            .iter_mut()
            .zip(&tokens[tokens.len() - tail..])
        {
            *slot = vocab.id_or_pad(word);
        }

        let scores = match backend.score(&window) {
            Ok(scores) => scores,
            Err(e) => {
                tracing::debug!("predict: model stage failed: {e}");
                return Vec::new();
            }
        };
        if scores.len() != vocab.len() {
            tracing::warn!(
                "predict: backend returned {} scores for a vocabulary of {}, skipping model stage",
                scores.len(),
                vocab.len()
            );
            return Vec::new();
        }

        let mut ranked: Vec<(TokenId, f32)> = scores
            .iter()
            .enumerate()
            .filter(|&(id, &score)| id != PAD_TOKEN_ID as usize && score >= epsilon)
            .map(|(id, &score)| (id as TokenId, score))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(k);

        ranked
            .into_iter()
            .filter_map(|(id, _)| vocab.word(id).map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::errors::{EngineError, QuillResult};
    use quill_core::snapshot::SnapshotMeta;

    // A backend with canned scores, for exercising the stage in isolation.
    struct FixedScores {
        meta: SnapshotMeta,
        scores: QuillResult<Vec<f32>>,
    }

    impl FixedScores {
        fn new(input_len: usize, scores: Vec<f32>) -> Self {
            Self {
                meta: SnapshotMeta {
                    input_len,
                    vocab_size: scores.len(),
                },
                scores: Ok(scores),
            }
        }

        fn failing(input_len: usize, vocab_size: usize) -> Self {
            Self {
                meta: SnapshotMeta {
                    input_len,
                    vocab_size,
                },
                scores: Err(EngineError::InferenceFailed("canned".into()).into()),
            }
        }
    }

    impl PredictionBackend for FixedScores {
        fn meta(&self) -> SnapshotMeta {
            self.meta
        }
        fn score(&self, _window: &[TokenId]) -> QuillResult<Vec<f32>> {
            match &self.scores {
                Ok(s) => Ok(s.clone()),
                Err(_) => Err(EngineError::InferenceFailed("canned".into()).into()),
            }
        }
        fn train(&mut self, _tokens: &[TokenId]) {}
        fn export(&self) -> QuillResult<quill_core::snapshot::ModelSnapshot> {
            Err(EngineError::BackendUnavailable.into())
        }
    }

    fn vocab() -> Vocabulary {
        Vocabulary::from_words(vec![
            "<pad>".into(),
            "good".into(),
            "morning".into(),
            "night".into(),
        ])
    }

    #[test]
    fn ranks_by_score_then_id() {
        let backend = FixedScores::new(2, vec![0.9, 0.3, 0.5, 0.3]);
        let words = ModelStage::run(&backend, &vocab(), &["good".into()], 3, 0.01);
        // Id 0 excluded despite top score; 0.3 tie broken by ascending id.
        assert_eq!(words, vec!["morning", "good", "night"]);
    }

    #[test]
    fn scores_below_epsilon_are_noise() {
        let backend = FixedScores::new(2, vec![0.0, 0.8, 0.005, 0.004]);
        let words = ModelStage::run(&backend, &vocab(), &[], 3, 0.01);
        assert_eq!(words, vec!["good"]);
    }

    #[test]
    fn backend_error_yields_empty_result() {
        let backend = FixedScores::failing(2, 4);
        let words = ModelStage::run(&backend, &vocab(), &["good".into()], 3, 0.01);
        assert!(words.is_empty());
    }

    #[test]
    fn score_vector_length_mismatch_skips_the_stage() {
        // Backend claims 4 but the live vocabulary has 5 entries.
        let backend = FixedScores::new(2, vec![0.1, 0.9, 0.1, 0.1]);
        let vocab = Vocabulary::from_words(vec![
            "<pad>".into(),
            "a1".into(),
            "b2".into(),
            "c3".into(),
            "d4".into(),
        ]);
        let words = ModelStage::run(&backend, &vocab, &[], 3, 0.01);
        assert!(words.is_empty());
    }

    #[test]
    fn result_is_capped_at_k() {
        let backend = FixedScores::new(2, vec![0.1, 0.4, 0.3, 0.2]);
        let words = ModelStage::run(&backend, &vocab(), &[], 2, 0.01);
        assert_eq!(words, vec!["good", "morning"]);
    }
}
