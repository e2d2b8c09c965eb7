use serde::{Deserialize, Serialize};

use super::defaults;

/// Prediction engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bounded history length L: how many recent words the store keeps.
    pub history_capacity: usize,
    /// Suggestions returned when the caller does not ask for a count.
    pub max_suggestions: usize,
    /// Model-stage scores below this are treated as noise and dropped.
    pub score_epsilon: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: defaults::DEFAULT_HISTORY_CAPACITY,
            max_suggestions: defaults::DEFAULT_MAX_SUGGESTIONS,
            score_epsilon: defaults::DEFAULT_SCORE_EPSILON,
        }
    }
}
