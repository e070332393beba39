//! Response classification: maps the remote service's raw (status, body)
//! into the normalized result taxonomy.
//!
//! The mapping is an explicit ordered table rather than nested
//! conditionals, so precedence is auditable independently of control flow:
//! exact status match first, then body-substring rules in table order
//! (first match wins, case-insensitive), then the per-status fallback or
//! the global default rule.

use crate::types::OperationResult;

/// A body-substring rule within one status code.
struct BodyRule {
    needle: &'static str,
    message: &'static str,
}

/// All rules for one remote status code.
///
/// `fallback: None` means an unmatched body falls through to the global
/// default rule, preserving the documented safety net for the service's
/// undocumented error vocabulary.
struct StatusRule {
    status: u16,
    body_rules: &'static [BodyRule],
    fallback: Option<&'static str>,
}

/// The documented mapping table. Order within `body_rules` is load-bearing.
static RESPONSE_RULES: &[StatusRule] = &[
    StatusRule {
        status: 200,
        body_rules: &[],
        fallback: Some("Request received for processing. Operation finished successfully."),
    },
    StatusRule {
        status: 400,
        body_rules: &[
            BodyRule {
                needle: "InactiveCustomer",
                message: "The workspace has been closed.",
            },
            BodyRule {
                needle: "InvalidApiVersion",
                message: "The API version that you specified wasn't recognized by the service.",
            },
            BodyRule {
                needle: "InvalidCustomerId",
                message: "The specified workspace ID is invalid.",
            },
            BodyRule {
                needle: "InvalidDataFormat",
                message: "An invalid JSON was submitted. The response body might contain more \
                          information about how to resolve the error.",
            },
            BodyRule {
                needle: "InvalidLogType",
                message: "The specified log type contained special characters or numerics.",
            },
            BodyRule {
                needle: "MissingApiVersion",
                message: "The API version wasn't specified.",
            },
            BodyRule {
                needle: "MissingContentType",
                message: "The content type wasn't specified.",
            },
            BodyRule {
                needle: "MissingLogType",
                message: "The required value log type wasn't specified.",
            },
            BodyRule {
                needle: "UnsupportedContentType",
                message: "The content type wasn't set to application/json.",
            },
        ],
        fallback: None,
    },
    StatusRule {
        status: 403,
        body_rules: &[BodyRule {
            needle: "InvalidAuthorization",
            message: "The service failed to authenticate the request. Verify that the \
                      workspace ID and connection key are valid.",
        }],
        fallback: None,
    },
    StatusRule {
        status: 404,
        body_rules: &[],
        fallback: Some("Either the provided URL is incorrect or the request is too large."),
    },
    StatusRule {
        status: 429,
        body_rules: &[],
        fallback: Some(
            "The service is experiencing a high volume of data from your account. Please retry \
             the request later.",
        ),
    },
    StatusRule {
        status: 500,
        body_rules: &[BodyRule {
            needle: "UnspecifiedError",
            message: "The service encountered an internal error. Please retry the request.",
        }],
        fallback: None,
    },
    StatusRule {
        status: 503,
        body_rules: &[BodyRule {
            needle: "ServiceUnavailable",
            message: "The service currently is unavailable to receive requests. Please retry \
                      your request.",
        }],
        fallback: None,
    },
];

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Classifies a raw remote (status, body) pair.
///
/// Total over all inputs: unknown status codes and unmatched bodies produce
/// the default rule, passing the input status through with a generic
/// message. The returned message is never empty.
#[must_use]
pub fn classify_response(status: u16, body: &str) -> OperationResult {
    if let Some(rule) = RESPONSE_RULES.iter().find(|r| r.status == status) {
        for body_rule in rule.body_rules {
            if contains_ignore_case(body, body_rule.needle) {
                return OperationResult::new(status, body_rule.message);
            }
        }
        if let Some(message) = rule.fallback {
            return OperationResult::new(status, message);
        }
    }
    OperationResult::new(
        status,
        format!("Status code {status} received, no specific response message available."),
    )
}
