//! Interpolated n-gram scoring backend.
//!
//! The concrete [`PredictionBackend`]: per-context follower weights for
//! every context suffix up to `input_len` tokens, interpolated with back-off
//! down to a unigram floor. Longer contexts carry exponentially more weight;
//! the final vector is normalized so scores read as probabilities and the
//! engine's epsilon cut stays meaningful.
//!
//! Weights are `f32` so that server-side averaging across devices stays
//! representable, and the tables are `BTreeMap`s so an exported snapshot is
//! byte-stable: exporting twice without intervening training yields
//! identical blobs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quill_core::errors::{EngineError, QuillResult, SnapshotError};
use quill_core::snapshot::{ModelSnapshot, SnapshotMeta};
use quill_core::traits::PredictionBackend;
use quill_core::vocabulary::{TokenId, PAD_TOKEN_ID};

/// Learned weight tables, serialized as the snapshot payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct WeightTable {
    /// Context suffix (most recent token last) → follower weights.
    contexts: BTreeMap<Vec<TokenId>, BTreeMap<TokenId, f32>>,
    /// Unigram weights indexed by token id; length equals vocabulary size.
    unigrams: Vec<f32>,
}

/// Longest context window a snapshot may declare.
const MAX_INPUT_LEN: usize = 8;

/// N-gram model over vocabulary ids.
#[derive(Debug, Clone)]
pub struct NgramBackend {
    meta: SnapshotMeta,
    weights: WeightTable,
}

impl NgramBackend {
    /// Create an untrained backend for the given window and vocabulary size.
    pub fn new(input_len: usize, vocab_size: usize) -> Self {
        Self {
            meta: SnapshotMeta {
                input_len,
                vocab_size,
            },
            weights: WeightTable {
                contexts: BTreeMap::new(),
                unigrams: vec![0.0; vocab_size],
            },
        }
    }

    /// Rebuild a backend from a validated snapshot envelope.
    ///
    /// The envelope checksum has already been verified by
    /// [`ModelSnapshot::decode`]; this validates that the payload actually
    /// matches the advertised metadata.
    pub fn from_snapshot(snapshot: &ModelSnapshot) -> QuillResult<Self> {
        if snapshot.meta.input_len == 0 || snapshot.meta.input_len > MAX_INPUT_LEN {
            return Err(SnapshotError::Decode(format!(
                "input length {} outside 1..={MAX_INPUT_LEN}",
                snapshot.meta.input_len
            ))
            .into());
        }
        let weights: WeightTable = bincode::deserialize(snapshot.payload())
            .map_err(|e| SnapshotError::Decode(e.to_string()))?;
        if weights.unigrams.len() != snapshot.meta.vocab_size {
            return Err(SnapshotError::Decode(format!(
                "unigram table holds {} entries, metadata says {}",
                weights.unigrams.len(),
                snapshot.meta.vocab_size
            ))
            .into());
        }
        Ok(Self {
            meta: snapshot.meta,
            weights,
        })
    }

    /// Whether the backend has seen no training at all.
    pub fn is_untrained(&self) -> bool {
        self.weights.contexts.is_empty() && self.weights.unigrams.iter().all(|w| *w == 0.0)
    }
}

impl PredictionBackend for NgramBackend {
    fn meta(&self) -> SnapshotMeta {
        self.meta
    }

    fn score(&self, window: &[TokenId]) -> QuillResult<Vec<f32>> {
        if window.len() != self.meta.input_len {
            return Err(EngineError::InferenceFailed(format!(
                "window holds {} tokens, model expects {}",
                window.len(),
                self.meta.input_len
            ))
            .into());
        }

        let vocab_size = self.meta.vocab_size;
        let mut scores = vec![0.0f32; vocab_size];

        // Left padding carries no signal; condition on the real suffix only.
        let first_real = window
            .iter()
            .position(|&t| t != PAD_TOKEN_ID)
            .unwrap_or(window.len());
        let context = &window[first_real..];

        // Back-off: every context suffix contributes, longer suffixes
        // exponentially more. Order 0 is the unigram floor with weight 1.
        for k in 1..=context.len() {
            let suffix = &context[context.len() - k..];
            let Some(followers) = self.weights.contexts.get(suffix) else {
                continue;
            };
            let total: f32 = followers.values().sum();
            if total <= 0.0 {
                continue;
            }
            let lambda = 2f32.powi(k as i32);
            for (&id, &weight) in followers {
                if (id as usize) < vocab_size {
                    scores[id as usize] += lambda * weight / total;
                }
            }
        }

        let unigram_total: f32 = self.weights.unigrams.iter().sum();
        if unigram_total > 0.0 {
            for (id, weight) in self.weights.unigrams.iter().enumerate() {
                scores[id] += weight / unigram_total;
            }
        }

        let sum: f32 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }
        Ok(scores)
    }

    fn train(&mut self, tokens: &[TokenId]) {
        let vocab_size = self.meta.vocab_size;
        for (i, &token) in tokens.iter().enumerate() {
            // Id 0 is the unknown/padding slot, never a learnable target.
            if token == PAD_TOKEN_ID || token as usize >= vocab_size {
                continue;
            }
            self.weights.unigrams[token as usize] += 1.0;

            for k in 1..=self.meta.input_len {
                if i < k {
                    break;
                }
                let context = &tokens[i - k..i];
                if context.contains(&PAD_TOKEN_ID) {
                    continue;
                }
                *self
                    .weights
                    .contexts
                    .entry(context.to_vec())
                    .or_default()
                    .entry(token)
                    .or_insert(0.0) += 1.0;
            }
        }
    }

    fn export(&self) -> QuillResult<ModelSnapshot> {
        let payload = bincode::serialize(&self.weights)
            .map_err(|e| SnapshotError::Encode(e.to_string()))?;
        Ok(ModelSnapshot::new(self.meta, payload))
    }
}
