//! Transport layer: blocking HTTP client for the aggregator's two endpoints.

pub mod http_client;

pub use http_client::{SyncClient, SyncClientConfig};
