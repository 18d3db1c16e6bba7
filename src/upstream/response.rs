//! Classification of upstream results and the response normalizer.
//!
//! The backend follows a convention of `success: boolean` inside 2xx bodies
//! and standard HTTP status codes for hard failures. `classify` folds both
//! into a single tagged outcome so handlers never inspect ad hoc fields, and
//! `normalize` collapses the three outcomes into the two client-visible
//! categories: success pass-through and failure with a fixed message.

use axum::http::StatusCode;
use serde_json::{json, Value};

/// Result of one upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    /// 2xx response without an explicit `success: false` marker
    Success(Value),
    /// Non-2xx response, or a 2xx body carrying `success: false`
    ApplicationFailure { status: StatusCode, body: Value },
    /// DNS/connect/timeout error, or an unparseable 2xx body
    TransportFailure(String),
}

/// Per-operation failure policy: the fixed client-facing message and whether
/// upstream error text may be surfaced next to it.
#[derive(Debug, Clone, Copy)]
pub struct FailurePolicy {
    pub message: &'static str,
    pub surface_detail: bool,
}

impl FailurePolicy {
    /// Fixed message only; upstream detail is suppressed (auth operations)
    #[must_use]
    pub const fn fixed(message: &'static str) -> Self {
        Self {
            message,
            surface_detail: false,
        }
    }

    /// Fixed message plus the upstream error text (protected reads)
    #[must_use]
    pub const fn with_detail(message: &'static str) -> Self {
        Self {
            message,
            surface_detail: true,
        }
    }
}

/// Classify an upstream HTTP result into an outcome.
///
/// A 2xx body carrying `"success": false` counts as an application failure
/// even though the transport succeeded; it carries no usable 4xx status, so
/// it is pinned to 400.
#[must_use]
pub fn classify(status: StatusCode, body: Value) -> UpstreamOutcome {
    if !status.is_success() {
        return UpstreamOutcome::ApplicationFailure { status, body };
    }

    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return UpstreamOutcome::ApplicationFailure {
            status: StatusCode::BAD_REQUEST,
            body,
        };
    }

    UpstreamOutcome::Success(body)
}

/// Collapse an outcome into the client-facing status and body.
///
/// Success passes the upstream body through verbatim. Application failures
/// mirror the upstream status when it is a 4xx and fall back to 400
/// otherwise, so the client always sees a 4xx for application failures and a
/// 5xx only for transport failures. On any failure the body carries a
/// human-readable `message` and the status is never 200.
#[must_use]
pub fn normalize(outcome: UpstreamOutcome, policy: FailurePolicy) -> (StatusCode, Value) {
    match outcome {
        UpstreamOutcome::Success(body) => (StatusCode::OK, body),
        UpstreamOutcome::ApplicationFailure { status, body } => {
            let status = if status.is_client_error() {
                status
            } else {
                StatusCode::BAD_REQUEST
            };

            let mut envelope = json!({ "message": policy.message });

            if policy.surface_detail {
                if let Some(detail) = error_text(&body) {
                    envelope["error"] = Value::String(detail);
                }
            }

            (status, envelope)
        }
        UpstreamOutcome::TransportFailure(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "message": "Internal Server Error" }),
        ),
    }
}

// Probe the common upstream error-text fields
fn error_text(body: &Value) -> Option<String> {
    for candidate in [&body["message"], &body["error"], &body["errors"][0]] {
        if let Some(text) = candidate.as_str() {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    if let Some(text) = body.as_str() {
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    None
}
