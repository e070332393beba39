//! Input and output types crossing the core boundary.

use serde::Serialize;

/// One payload submitted for forwarding.
///
/// The body is opaque JSON text; the core does not validate it. Schema and
/// syntax checking is the ingestion service's concern, and its verdict comes
/// back through classification.
#[derive(Debug, Clone)]
pub struct LogSubmission {
    /// Raw JSON text exactly as received from the caller.
    pub body: String,
    /// Name of the logical log stream (custom log table) the payload
    /// belongs to.
    pub log_type: String,
    /// Optional name of a payload field holding the record timestamp.
    /// `None` or empty means the service assigns ingestion time.
    pub time_generated_field: Option<String>,
}

impl LogSubmission {
    /// Creates a submission without a time-generated field.
    #[must_use]
    pub fn new(body: impl Into<String>, log_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            log_type: log_type.into(),
            time_generated_field: None,
        }
    }

    /// Sets the time-generated field name.
    #[must_use]
    pub fn with_time_generated_field(mut self, field: impl Into<String>) -> Self {
        self.time_generated_field = Some(field.into());
        self
    }
}

/// The normalized outcome of one proxy operation.
///
/// Always well-formed: `status` mirrors HTTP semantics and `message` is
/// never empty, regardless of which layer failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    /// HTTP-shaped status code.
    pub status: u16,
    /// Human-readable description of the outcome.
    pub message: String,
}

impl OperationResult {
    /// Creates a result from a status and message.
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
