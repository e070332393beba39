//! Outbound transport abstraction.
//!
//! The core issues exactly one send per operation and never retries.
//! Connection pooling, TLS, and timeouts belong to the injected
//! implementation (reqwest in the server crate, fakes in tests).

use async_trait::async_trait;

use crate::request::SignedRequest;

/// Raw status and body from the remote service, before classification.
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: String,
}

/// A network-level failure: DNS, TLS, connection reset, timeout.
///
/// Remote error *responses* are not transport errors; they arrive as
/// [`RemoteResponse`] values and are classified as data.
#[derive(Debug, thiserror::Error)]
#[error("outbound request failed: {0}")]
pub struct TransportError(#[from] pub anyhow::Error);

/// Executes one signed outbound request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw remote response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network-level failures.
    async fn send(&self, request: &SignedRequest) -> Result<RemoteResponse, TransportError>;
}
