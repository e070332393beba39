//! Custom log submission endpoint handler.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use bytes::Bytes;
use collector_core::{LogSubmission, OperationResult};
use tracing::debug;

use super::AppState;

/// Response for a missing or empty `Log-Type` header. Short-circuits before
/// the core is ever invoked.
const MISSING_LOG_TYPE_MESSAGE: &str = "Missing required 'Log-Type' request header.";

/// Handles `POST /api/datacollector/customlog`.
///
/// The body is treated as opaque JSON text and forwarded byte-for-byte; the
/// ingestion service is the authority on whether it is valid JSON. The
/// response mirrors the normalized result: the JSON body carries the status
/// and message, and the HTTP status repeats the same code.
pub async fn custom_log_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<OperationResult>) {
    let _guard = state.shutdown.in_flight_guard();

    let log_type = headers
        .get("Log-Type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if log_type.is_empty() {
        return respond(OperationResult::new(400, MISSING_LOG_TYPE_MESSAGE));
    }

    let Ok(payload) = String::from_utf8(body.to_vec()) else {
        return respond(OperationResult::new(400, "Request body must be valid UTF-8."));
    };

    let mut submission = LogSubmission::new(payload, log_type);
    if let Some(field) = headers
        .get("time-generated-field")
        .and_then(|value| value.to_str().ok())
    {
        submission = submission.with_time_generated_field(field);
    }

    debug!(log_type = %submission.log_type, bytes = submission.body.len(), "forwarding custom log");
    respond(state.api.post_custom_log(&submission).await)
}

/// Maps an [`OperationResult`] onto an HTTP response. Out-of-range status
/// codes degrade to 500.
fn respond(result: OperationResult) -> (StatusCode, Json<OperationResult>) {
    let status =
        StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result))
}
