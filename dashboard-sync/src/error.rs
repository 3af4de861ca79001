//! Error types for dashboard-sync.

use thiserror::Error;

/// Failures below the synchronizer boundary. None of these reach consumers:
/// the synchronizer collapses every variant into
/// [`NormalizedError::internal`](dashboard_core::NormalizedError::internal).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS or timeout failure reported by the HTTP client.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body could not be read.
    #[error("I/O error reading {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The response body was not valid JSON.
    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The blocking worker running the request panicked or was cancelled.
    #[error("transport worker failed: {0}")]
    Worker(String),
}
