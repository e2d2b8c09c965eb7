//! The shared live handle: atomic engine hot-swap plus serialized observation.
//!
//! The engine slot is the single synchronization point between the
//! interactive path and the sync path. Readers clone the `Arc` under a read
//! lock and predict against that instance, so an in-flight prediction always
//! completes against a fully-initialized engine: the old one if it started
//! before a swap, the new one after. History lives beside the engine and
//! survives swaps.

use std::sync::{Arc, Mutex, RwLock};

use crate::engine::PredictionEngine;
use crate::history::{HistorySnapshot, UserHistoryStore};

/// Thread-safe owner of the live engine and the user history.
pub struct LivePredictor {
    engine: RwLock<Arc<PredictionEngine>>,
    history: Mutex<UserHistoryStore>,
}

impl LivePredictor {
    /// Wrap an initial engine and history store.
    pub fn new(engine: PredictionEngine, history: UserHistoryStore) -> Self {
        Self {
            engine: RwLock::new(Arc::new(engine)),
            history: Mutex::new(history),
        }
    }

    /// The currently live engine.
    pub fn engine(&self) -> Arc<PredictionEngine> {
        self.engine
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Atomically replace the live engine. The retiring instance finishes
    /// any prediction already running against it, then drops.
    pub fn install(&self, engine: PredictionEngine) {
        let mut slot = self
            .engine
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Arc::new(engine);
    }

    /// Record one typed word (serialized through the history mutex).
    pub fn observe(&self, word: &str) {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .observe(word);
    }

    /// Predict against the live engine and current history.
    pub fn predict(&self, context: &str, max_suggestions: usize) -> Vec<String> {
        let engine = self.engine();
        let history = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        engine.predict(context, &history, max_suggestions)
    }

    /// Immutable history copy for the training/export step.
    pub fn history_snapshot(&self) -> HistorySnapshot {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .snapshot_for_training()
    }
}
