//! Error types for transport and the sync cycle.

/// Errors raised by the wire transport and the lifecycle manager.
///
/// Transport failures are normal, recoverable outcomes: the next scheduled
/// cycle is the retry mechanism.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Connection, write, or read failure (including timeouts).
    #[error("network error: {reason}")]
    Network {
        /// Underlying failure description.
        reason: String,
    },

    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {status}")]
    HttpStatus {
        /// Numeric status code.
        status: u16,
    },

    /// The server answered 2xx but sent no body.
    #[error("server returned an empty body")]
    EmptyBody,

    /// A sync cycle is already in flight for this device.
    #[error("a sync cycle is already in flight")]
    AlreadyInFlight,

    /// No aggregator endpoint is configured.
    #[error("aggregator endpoint not configured")]
    EndpointMissing,

    /// The device identity could not be read or persisted.
    #[error("device identity error: {0}")]
    Identity(String),
}
