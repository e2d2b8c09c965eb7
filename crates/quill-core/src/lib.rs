//! # quill-core
//!
//! Core types, traits, errors, and configuration for the Quill on-device
//! prediction system: the immutable vocabulary, the versioned snapshot wire
//! format, and the `PredictionBackend` trait implemented by concrete scorers.
//!
//! Nothing in this crate performs I/O beyond loading the vocabulary file and
//! parsing the config file; transport and scheduling live in `quill-sync`.

pub mod config;
pub mod errors;
pub mod snapshot;
pub mod traits;
pub mod vocabulary;

pub use config::{EngineConfig, QuillConfig, SyncConfig};
pub use errors::{QuillError, QuillResult};
pub use snapshot::{ModelSnapshot, SnapshotMeta, SNAPSHOT_FORMAT_VERSION};
pub use traits::PredictionBackend;
pub use vocabulary::{TokenId, Vocabulary, PAD_TOKEN_ID};
