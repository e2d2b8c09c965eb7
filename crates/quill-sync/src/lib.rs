//! # quill-sync
//!
//! Federated synchronization for the Quill prediction engine: the wire
//! transport to the aggregator, the persisted device identity, the model
//! lifecycle manager (export → upload, download → verify → hot-swap), and
//! the periodic background scheduler.
//!
//! Raw typed text never crosses the wire, only the opaque snapshot blob.
//! The aggregator's averaging is its own concern; this crate consumes
//! exactly its two endpoints.

pub mod identity;
pub mod lifecycle;
pub mod scheduler;
pub mod transport;

pub use identity::DeviceIdentity;
pub use lifecycle::{CycleReport, ModelLifecycleManager};
pub use scheduler::SyncScheduler;
pub use transport::{SyncClient, SyncClientConfig};
