//! Immutable word ↔ id vocabulary.
//!
//! Loaded once from a newline-delimited file; the 0-based line index is the
//! word id. Id 0 doubles as the padding/unknown slot for the inference path,
//! so the model stage never emits it as a suggestion even if line 0 holds a
//! real word. The fallback stage ranks words, not ids, and is unaffected.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::{EngineError, QuillResult};

/// Dense 0-based token identifier.
pub type TokenId = u32;

/// Id reserved by the inference path for unknown/padding tokens.
pub const PAD_TOKEN_ID: TokenId = 0;

/// Immutable bidirectional word ↔ id mapping, built once at load.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    ids: HashMap<String, TokenId>,
}

impl Vocabulary {
    /// Build from an ordered word list; slot index is the id.
    ///
    /// Duplicate words keep their first id. Empty slots stay addressable by
    /// id but are never returned by `id()`.
    pub fn from_words(words: Vec<String>) -> Self {
        let mut ids = HashMap::with_capacity(words.len());
        for (index, word) in words.iter().enumerate() {
            if !word.is_empty() {
                ids.entry(word.clone()).or_insert(index as TokenId);
            }
        }
        Self { words, ids }
    }

    /// Load a newline-delimited vocabulary file.
    pub fn load(path: &Path) -> QuillResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| EngineError::VocabularyLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let words: Vec<String> = text.lines().map(|line| line.trim().to_string()).collect();
        tracing::debug!("vocabulary: loaded {} words from {}", words.len(), path.display());
        Ok(Self::from_words(words))
    }

    /// Id for a word, if present.
    pub fn id(&self, word: &str) -> Option<TokenId> {
        self.ids.get(word).copied()
    }

    /// Id for a word, mapping unknown words to the padding id.
    pub fn id_or_pad(&self, word: &str) -> TokenId {
        self.id(word).unwrap_or(PAD_TOKEN_ID)
    }

    /// Word at an id, if the id is in range.
    pub fn word(&self, id: TokenId) -> Option<&str> {
        self.words.get(id as usize).map(String::as_str)
    }

    /// Vocabulary size V.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
