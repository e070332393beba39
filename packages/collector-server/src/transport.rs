//! Reqwest-backed outbound transport.

use async_trait::async_trait;
use collector_core::{RemoteResponse, SignedRequest, Transport, TransportError};

/// Sends signed requests over a shared, pooled `reqwest::Client`.
///
/// The client is safe for concurrent use; this wrapper only sets per-call
/// headers and never mutates shared client state. Timeouts are configured
/// on the client at construction time.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Wraps an externally constructed client.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &SignedRequest) -> Result<RemoteResponse, TransportError> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        // without_url(): the URL embeds the workspace id, which must not
        // surface in error messages or logs.
        let response = builder
            .body(request.body.clone())
            .send()
            .await
            .map_err(|err| TransportError(anyhow::Error::new(err.without_url())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError(anyhow::Error::new(err.without_url())))?;

        Ok(RemoteResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_a_shared_client() {
        let transport = HttpTransport::new(reqwest::Client::new());
        // Clones share the same connection pool.
        let _second = transport.clone();
    }
}
