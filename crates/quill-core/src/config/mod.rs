//! Configuration: serde structs with defaults, loadable from a TOML file.

pub mod defaults;

mod engine_config;
mod sync_config;

pub use engine_config::EngineConfig;
pub use sync_config::SyncConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{QuillError, QuillResult};

/// Top-level configuration for the prediction service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    /// Prediction engine tunables.
    pub engine: EngineConfig,
    /// Federated sync settings.
    pub sync: SyncConfig,
}

impl QuillConfig {
    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> QuillResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| QuillError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&text).map_err(|e| QuillError::Config(format!("{}: {e}", path.display())))
    }
}
