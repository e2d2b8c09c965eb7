use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Federated sync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Aggregator base URL. `None` disables sync entirely.
    pub endpoint_url: Option<String>,
    /// Periodic sync interval in seconds.
    pub sync_interval_secs: u64,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Request (read/write) timeout in seconds.
    pub request_timeout_secs: u64,
    /// Directory holding the persisted model file and device identity.
    pub data_dir: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            sync_interval_secs: defaults::DEFAULT_SYNC_INTERVAL_SECS,
            connect_timeout_secs: defaults::DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            data_dir: PathBuf::from(defaults::DEFAULT_DATA_DIR),
        }
    }
}
