//! Bounded user-typing history with derived frequency and follower counts.
//!
//! The store is the single logical owner of incremental learning state: an
//! observation is applied in full under one `&mut` call, so `frequency` and
//! `followers` can never be half-updated. Counts are monotonic; only the
//! FIFO history itself is bounded.

use std::collections::{HashMap, VecDeque};

/// Observations shorter than this are ignored entirely.
pub const MIN_WORD_LEN: usize = 2;

/// Bounded FIFO of recent words plus derived statistics.
#[derive(Debug, Clone)]
pub struct UserHistoryStore {
    capacity: usize,
    history: VecDeque<String>,
    frequency: HashMap<String, u64>,
    followers: HashMap<String, HashMap<String, u64>>,
}

/// Immutable copy of the store, taken for training/export so that concurrent
/// observation cannot corrupt an in-progress export.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    /// Ordered recent words, oldest first.
    pub history: Vec<String>,
    /// Total accepted observations per word.
    pub frequency: HashMap<String, u64>,
    /// Bigram follower counts: word → (next word → count).
    pub followers: HashMap<String, HashMap<String, u64>>,
}

impl UserHistoryStore {
    /// Create a store bounded to the last `capacity` observations.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            history: VecDeque::with_capacity(capacity),
            frequency: HashMap::new(),
            followers: HashMap::new(),
        }
    }

    /// Record one typed word.
    ///
    /// Words shorter than [`MIN_WORD_LEN`] are ignored. Otherwise the word is
    /// lowercased, appended (evicting the oldest entry at capacity), and its
    /// frequency incremented; when a previous accepted word exists, the
    /// `followers[previous][word]` count is incremented too.
    pub fn observe(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if word.chars().count() < MIN_WORD_LEN {
            return;
        }

        if let Some(previous) = self.history.back().cloned() {
            *self
                .followers
                .entry(previous)
                .or_default()
                .entry(word.clone())
                .or_insert(0) += 1;
        }

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(word.clone());
        *self.frequency.entry(word).or_insert(0) += 1;
    }

    /// The `k` globally most frequent words, count descending, ties broken
    /// lexically ascending.
    pub fn top_global(&self, k: usize) -> Vec<String> {
        let mut ranked: Vec<(&String, u64)> =
            self.frequency.iter().map(|(w, c)| (w, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().take(k).map(|(w, _)| w.clone()).collect()
    }

    /// The `k` most frequent followers of `word`, same ordering as
    /// [`top_global`](Self::top_global).
    pub fn followers_of(&self, word: &str, k: usize) -> Vec<String> {
        let Some(next) = self.followers.get(word) else {
            return Vec::new();
        };
        let mut ranked: Vec<(&String, u64)> = next.iter().map(|(w, c)| (w, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().take(k).map(|(w, _)| w.clone()).collect()
    }

    /// Raw follower counts for a word, if any exist.
    pub fn follower_counts(&self, word: &str) -> Option<&HashMap<String, u64>> {
        self.followers.get(word)
    }

    /// Total accepted observations of `word`.
    pub fn frequency_of(&self, word: &str) -> u64 {
        self.frequency.get(word).copied().unwrap_or(0)
    }

    /// Number of words currently held in the FIFO.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether nothing has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The configured bound L.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recently observed word.
    pub fn last_word(&self) -> Option<&str> {
        self.history.back().map(String::as_str)
    }

    /// Immutable copy for the training/export step.
    pub fn snapshot_for_training(&self) -> HistorySnapshot {
        HistorySnapshot {
            history: self.history.iter().cloned().collect(),
            frequency: self.frequency.clone(),
            followers: self.followers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_words_are_ignored() {
        let mut store = UserHistoryStore::new(10);
        store.observe("a");
        store.observe("I");
        store.observe("ok");
        assert_eq!(store.len(), 1);
        assert_eq!(store.frequency_of("a"), 0);
        assert_eq!(store.frequency_of("ok"), 1);
    }

    #[test]
    fn fifo_evicts_oldest_at_capacity() {
        let mut store = UserHistoryStore::new(3);
        for word in ["alpha", "bravo", "charlie", "delta"] {
            store.observe(word);
        }
        assert_eq!(store.len(), 3);
        let snapshot = store.snapshot_for_training();
        assert_eq!(snapshot.history, vec!["bravo", "charlie", "delta"]);
        // Counts are monotonic; eviction does not decrement.
        assert_eq!(store.frequency_of("alpha"), 1);
    }

    #[test]
    fn frequency_counts_accepted_observations() {
        let mut store = UserHistoryStore::new(10);
        store.observe("good");
        store.observe("good");
        store.observe("x"); // rejected
        store.observe("good");
        assert_eq!(store.frequency_of("good"), 3);
    }

    #[test]
    fn followers_track_consecutive_observations() {
        let mut store = UserHistoryStore::new(10);
        for word in ["good", "morning", "good", "morning", "good", "night"] {
            store.observe(word);
        }
        let counts = store.follower_counts("good").unwrap();
        assert_eq!(counts.get("morning"), Some(&2));
        assert_eq!(counts.get("night"), Some(&1));
        assert_eq!(store.followers_of("good", 3), vec!["morning", "night"]);
    }

    #[test]
    fn rejected_word_does_not_break_a_bigram() {
        let mut store = UserHistoryStore::new(10);
        store.observe("good");
        store.observe("a"); // rejected, "good" stays the previous word
        store.observe("morning");
        let counts = store.follower_counts("good").unwrap();
        assert_eq!(counts.get("morning"), Some(&1));
    }

    #[test]
    fn ranking_ties_break_lexically() {
        let mut store = UserHistoryStore::new(10);
        for word in ["zebra", "apple", "zebra", "apple"] {
            store.observe(word);
        }
        assert_eq!(store.top_global(2), vec!["apple", "zebra"]);
    }

    #[test]
    fn observation_is_case_insensitive() {
        let mut store = UserHistoryStore::new(10);
        store.observe("Good");
        store.observe("GOOD");
        assert_eq!(store.frequency_of("good"), 2);
    }

    #[test]
    fn snapshot_is_independent_of_later_observations() {
        let mut store = UserHistoryStore::new(10);
        store.observe("hello");
        let snapshot = store.snapshot_for_training();
        store.observe("world");
        assert_eq!(snapshot.history, vec!["hello"]);
        assert_eq!(store.len(), 2);
    }
}
