//! Route handlers for the portal proxy.
//!
//! Every proxy endpoint follows the same contract: read the session cookie
//! when the operation is protected, forward the inbound body to the upstream
//! client, and let the normalizer collapse the outcome into the client-facing
//! envelope. Failures never propagate past a handler.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod session;
pub mod users;

// common functions for the handlers
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use regex::Regex;
use serde_json::{json, Value};

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Envelope for a failure produced locally, before any upstream call
pub(crate) fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Normalized `(status, body)` pair as an HTTP response
pub(crate) fn reply((status, body): (StatusCode, Value)) -> Response {
    (status, Json(body)).into_response()
}
