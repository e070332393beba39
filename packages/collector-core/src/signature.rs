//! Authorization signature for the Data Collector endpoint.
//!
//! The endpoint authenticates requests with an HMAC-SHA256 over a canonical
//! string derived from the outbound request. The string layout is mandated
//! by the protocol; reordering or reformatting any field produces a
//! signature the service silently rejects as unauthorized.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Errors from building the authorization signature.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The workspace key could not be decoded as base64. The raw decode
    /// error is carried as the source; the key itself is never included.
    #[error("workspace key is not valid base64")]
    InvalidKeyFormat(#[source] base64::DecodeError),
}

/// Builds the canonical string the signature is computed over.
///
/// `body_len` is the UTF-8 byte length of the payload, not its character
/// count. The two differ for payloads containing non-ASCII text, and the
/// service verifies the signature against the bytes it receives.
#[must_use]
pub fn string_to_sign(body_len: usize, date: &str) -> String {
    format!("POST\n{body_len}\napplication/json\nx-ms-date:{date}\n/api/logs")
}

/// Computes the base64 HMAC-SHA256 of `string_to_sign` keyed by the decoded
/// workspace key.
///
/// Deterministic: identical inputs always produce the identical signature.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidKeyFormat`] when `base64_key` is not
/// valid base64.
pub fn sign(string_to_sign: &str, base64_key: &str) -> Result<String, SignatureError> {
    let key = BASE64
        .decode(base64_key)
        .map_err(SignatureError::InvalidKeyFormat)?;
    let mut mac = HmacSha256::new_from_slice(&key).expect("HMAC accepts any key length");
    mac.update(string_to_sign.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
