// Single source of truth for all default values.

// --- Engine ---
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;
pub const DEFAULT_SCORE_EPSILON: f32 = 0.01;
pub const DEFAULT_INPUT_LEN: usize = 2;

// --- Sync ---
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 900; // 15 minutes
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_DATA_DIR: &str = "quill-data";
