//! Outbound request assembly.
//!
//! Pure builder: given a submission, resolved credentials, and an RFC 1123
//! timestamp, produces the fully formed signed request. No I/O happens here.

use crate::settings::WorkspaceCredentials;
use crate::signature::{sign, string_to_sign, SignatureError};
use crate::types::LogSubmission;

/// API version pinned by the Data Collector protocol.
pub const API_VERSION: &str = "2016-04-01";

/// A fully formed outbound request, ready for a [`crate::Transport`].
///
/// The method is always POST. Headers are carried as name/value pairs so
/// the transport layer stays free of any signing knowledge.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Target URL, including the workspace-specific hostname.
    pub url: String,
    /// Headers in insertion order.
    pub headers: Vec<(&'static str, String)>,
    /// Raw payload text, forwarded byte-for-byte.
    pub body: String,
}

/// Assembles the signed outbound request.
///
/// The `Content-Type` header deliberately carries no charset parameter: the
/// ingestion service rejects `application/json; charset=utf-8` as
/// unauthorized.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidKeyFormat`] when the workspace key is
/// not valid base64.
pub fn assemble(
    submission: &LogSubmission,
    credentials: &WorkspaceCredentials,
    date: &str,
) -> Result<SignedRequest, SignatureError> {
    let url = format!(
        "https://{}.ods.opinsights.azure.com/api/logs?api-version={API_VERSION}",
        credentials.workspace_id
    );

    let to_sign = string_to_sign(submission.body.len(), date);
    let signature = sign(&to_sign, &credentials.workspace_key)?;

    let mut headers = vec![
        ("Accept", "application/json".to_string()),
        ("Content-Type", "application/json".to_string()),
        ("Log-Type", submission.log_type.clone()),
        (
            "Authorization",
            format!("SharedKey {}:{signature}", credentials.workspace_id),
        ),
        ("x-ms-date", date.to_string()),
    ];

    if let Some(field) = &submission.time_generated_field {
        if !field.is_empty() {
            headers.push(("time-generated-field", field.clone()));
        }
    }

    Ok(SignedRequest {
        url,
        headers,
        body: submission.body.clone(),
    })
}
