//! Frequency fallback stage: follower counts, then global counts, then a
//! fixed static list.
//!
//! Fully functional standalone; a missing or cold model never degrades
//! prediction below this stage. All orderings are deterministic: count
//! descending, ties lexically ascending.

use crate::history::UserHistoryStore;

/// Last-resort suggestions for a completely cold store.
const STATIC_FALLBACK: &[&str] = &[
    "the", "to", "and", "you", "that", "for", "it", "with", "on", "this",
];

/// The statistical half of the hybrid engine.
pub struct FallbackStage;

impl FallbackStage {
    /// Produce up to `max` ranked suggestions from history statistics.
    ///
    /// Follower counts of the last context word win when at least
    /// `min(2, max)` distinct followers exist; otherwise the globally most
    /// frequent words; otherwise the static list.
    pub fn run(history: &UserHistoryStore, last_word: Option<&str>, max: usize) -> Vec<String> {
        if max == 0 {
            return Vec::new();
        }

        if let Some(last) = last_word {
            let followers = history.followers_of(last, max);
            if followers.len() >= 2.min(max) && !followers.is_empty() {
                return followers;
            }
        }

        let global = history.top_global(max);
        if !global.is_empty() {
            return global;
        }

        STATIC_FALLBACK
            .iter()
            .take(max)
            .map(|word| (*word).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> UserHistoryStore {
        let mut store = UserHistoryStore::new(100);
        for word in ["good", "morning", "good", "morning", "good", "night"] {
            store.observe(word);
        }
        store
    }

    #[test]
    fn followers_win_when_plentiful() {
        let history = seeded();
        let words = FallbackStage::run(&history, Some("good"), 3);
        assert_eq!(words, vec!["morning", "night"]);
    }

    #[test]
    fn single_follower_falls_back_to_global() {
        let history = seeded();
        // "morning" was only ever followed by "good".
        let words = FallbackStage::run(&history, Some("morning"), 3);
        assert_eq!(words, vec!["good", "morning", "night"]);
    }

    #[test]
    fn single_follower_suffices_when_one_was_asked_for() {
        let history = seeded();
        let words = FallbackStage::run(&history, Some("morning"), 1);
        assert_eq!(words, vec!["good"]);
    }

    #[test]
    fn no_context_uses_global_frequency() {
        let history = seeded();
        let words = FallbackStage::run(&history, None, 2);
        assert_eq!(words, vec!["good", "morning"]);
    }

    #[test]
    fn cold_store_uses_the_static_list() {
        let history = UserHistoryStore::new(100);
        let words = FallbackStage::run(&history, None, 3);
        assert_eq!(words, vec!["the", "to", "and"]);
    }

    #[test]
    fn zero_max_yields_nothing() {
        let history = seeded();
        assert!(FallbackStage::run(&history, Some("good"), 0).is_empty());
    }
}
