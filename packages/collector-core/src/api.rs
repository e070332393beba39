//! The proxy operation: one request/response cycle end to end.
//!
//! This is the only layer that recovers from errors. Everything below it
//! either computes deterministically or fails with a typed condition;
//! everything above it always sees a well-formed [`OperationResult`].

use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::classify::classify_response;
use crate::request::assemble;
use crate::settings::{SettingsError, SettingsProvider, WorkspaceCredentials};
use crate::signature::SignatureError;
use crate::transport::{Transport, TransportError};
use crate::types::{LogSubmission, OperationResult};

/// Caller-visible message for any failure before or during the outbound
/// call. Deliberately generic: the specific cause goes to the logs, never
/// to the caller, so secrets and infrastructure details cannot leak.
pub const CALL_FAILED_MESSAGE: &str = "Failed to make call to Log Analytics REST API.";

/// Internal failure taxonomy, recovered at this boundary.
#[derive(Debug, thiserror::Error)]
enum OperationError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Orchestrates settings resolution, signing, transport, and
/// classification for custom log submissions.
///
/// Stateless across operations: credentials are re-resolved per call (a
/// rotated key takes effect immediately) and the transport is a shared,
/// concurrency-safe handle.
pub struct DataCollectorApi {
    settings: Arc<dyn SettingsProvider>,
    transport: Arc<dyn Transport>,
}

impl DataCollectorApi {
    /// Creates the API from its injected collaborators.
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsProvider>, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Forwards one submission to the workspace ingestion endpoint.
    ///
    /// Never fails past this boundary: configuration, signing, and
    /// transport failures are logged and normalized to a 500 result with
    /// [`CALL_FAILED_MESSAGE`]; remote error responses are classified data.
    pub async fn post_custom_log(&self, submission: &LogSubmission) -> OperationResult {
        match self.try_post(submission).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, log_type = %submission.log_type, "custom log post failed");
                OperationResult::new(500, CALL_FAILED_MESSAGE)
            }
        }
    }

    async fn try_post(&self, submission: &LogSubmission) -> Result<OperationResult, OperationError> {
        let credentials = WorkspaceCredentials::resolve(self.settings.as_ref())?;
        let date = httpdate::fmt_http_date(SystemTime::now());
        let request = assemble(submission, &credentials, &date)?;

        let response = self.transport.send(&request).await?;
        debug!(
            status = response.status,
            log_type = %submission.log_type,
            "remote service responded"
        );
        Ok(classify_response(response.status, &response.body))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::request::SignedRequest;
    use crate::settings::{setting_names, StaticSettings};
    use crate::transport::RemoteResponse;

    const KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    /// Fake transport returning a fixed response and recording what it saw.
    struct FixedTransport {
        status: u16,
        body: &'static str,
        calls: AtomicUsize,
        last_request: Mutex<Option<SignedRequest>>,
    }

    impl FixedTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, request: &SignedRequest) -> Result<RemoteResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            Ok(RemoteResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    /// Fake transport that always fails at the network level.
    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(&self, _request: &SignedRequest) -> Result<RemoteResponse, TransportError> {
            Err(TransportError(anyhow::anyhow!("connection reset")))
        }
    }

    fn valid_settings() -> Arc<StaticSettings> {
        Arc::new(
            StaticSettings::new()
                .with(setting_names::WORKSPACE_ID, "workspace-1")
                .with(setting_names::WORKSPACE_KEY, KEY),
        )
    }

    #[tokio::test]
    async fn successful_post_classifies_as_success() {
        let transport = FixedTransport::new(200, "");
        let api = DataCollectorApi::new(valid_settings(), Arc::clone(&transport) as Arc<dyn Transport>);

        let result = api
            .post_custom_log(&LogSubmission::new(r#"{"a":1}"#, "Test"))
            .await;

        assert_eq!(result.status, 200);
        assert_eq!(
            result.message,
            "Request received for processing. Operation finished successfully."
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn outbound_request_is_signed_for_the_workspace() {
        let transport = FixedTransport::new(200, "");
        let api = DataCollectorApi::new(valid_settings(), Arc::clone(&transport) as Arc<dyn Transport>);

        api.post_custom_log(&LogSubmission::new(r#"{"a":1}"#, "Test"))
            .await;

        let request = transport.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(
            request.url,
            "https://workspace-1.ods.opinsights.azure.com/api/logs?api-version=2016-04-01"
        );
        let auth = request
            .headers
            .iter()
            .find(|(n, _)| *n == "Authorization")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert!(auth.starts_with("SharedKey workspace-1:"));
        assert_eq!(request.body, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn remote_error_body_is_classified() {
        let transport = FixedTransport::new(400, r#"{"Error":"InvalidDataFormat"}"#);
        let api = DataCollectorApi::new(valid_settings(), transport);

        let result = api
            .post_custom_log(&LogSubmission::new("not json", "Test"))
            .await;

        assert_eq!(result.status, 400);
        assert_eq!(
            result.message,
            "An invalid JSON was submitted. The response body might contain more \
             information about how to resolve the error."
        );
    }

    #[tokio::test]
    async fn unmapped_remote_status_passes_through() {
        let transport = FixedTransport::new(418, "short and stout");
        let api = DataCollectorApi::new(valid_settings(), transport);

        let result = api
            .post_custom_log(&LogSubmission::new(r#"{"a":1}"#, "Test"))
            .await;

        assert_eq!(result.status, 418);
        assert_eq!(
            result.message,
            "Status code 418 received, no specific response message available."
        );
    }

    #[tokio::test]
    async fn missing_workspace_id_never_reaches_the_transport() {
        let settings = Arc::new(StaticSettings::new().with(setting_names::WORKSPACE_KEY, KEY));
        let transport = FixedTransport::new(200, "");
        let api = DataCollectorApi::new(settings, Arc::clone(&transport) as Arc<dyn Transport>);

        let result = api
            .post_custom_log(&LogSubmission::new(r#"{"a":1}"#, "Test"))
            .await;

        assert_eq!(result.status, 500);
        assert_eq!(result.message, CALL_FAILED_MESSAGE);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_workspace_key_never_reaches_the_transport() {
        let settings = Arc::new(
            StaticSettings::new().with(setting_names::WORKSPACE_ID, "workspace-1"),
        );
        let transport = FixedTransport::new(200, "");
        let api = DataCollectorApi::new(settings, Arc::clone(&transport) as Arc<dyn Transport>);

        let result = api
            .post_custom_log(&LogSubmission::new(r#"{"a":1}"#, "Test"))
            .await;

        assert_eq!(result.status, 500);
        assert_eq!(result.message, CALL_FAILED_MESSAGE);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_workspace_key_yields_the_generic_failure() {
        let settings = Arc::new(
            StaticSettings::new()
                .with(setting_names::WORKSPACE_ID, "workspace-1")
                .with(setting_names::WORKSPACE_KEY, "not base64 at all"),
        );
        let transport = FixedTransport::new(200, "");
        let api = DataCollectorApi::new(settings, Arc::clone(&transport) as Arc<dyn Transport>);

        let result = api
            .post_custom_log(&LogSubmission::new(r#"{"a":1}"#, "Test"))
            .await;

        assert_eq!(result.status, 500);
        assert_eq!(result.message, CALL_FAILED_MESSAGE);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transport_failure_normalizes_to_500() {
        let api = DataCollectorApi::new(valid_settings(), Arc::new(FailingTransport));

        let result = api
            .post_custom_log(&LogSubmission::new(r#"{"a":1}"#, "Test"))
            .await;

        assert_eq!(result.status, 500);
        assert_eq!(result.message, CALL_FAILED_MESSAGE);
    }
}
