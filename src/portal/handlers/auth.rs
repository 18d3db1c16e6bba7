//! Auth proxy endpoints: email confirmation, OTP verification, login, logout.
//!
//! Failure messages here are fixed and localized; upstream error detail is
//! never surfaced on auth operations.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, warn};

use super::{reject, reply, session, valid_email};
use crate::portal::PortalState;
use crate::upstream::{normalize, FailurePolicy, UpstreamOutcome};

const CONFIRM_EMAIL_FAILED: &str = "Email không hợp lệ hoặc chưa được đăng ký";
const VERIFY_TOKEN_FAILED: &str = "Mã OTP không hợp lệ hoặc hết hạn";
const LOGIN_FAILED: &str = "Đăng nhập thất bại";

#[utoipa::path(
    post,
    path = "/api/auth/confirm-email",
    responses(
        (status = 200, description = "Upstream response passed through"),
        (status = 400, description = "Invalid email or upstream rejection"),
        (status = 500, description = "Upstream unreachable")
    ),
    tag = "auth"
)]
pub async fn confirm_email(
    state: Extension<Arc<PortalState>>,
    payload: Option<Json<Value>>,
) -> impl IntoResponse {
    let body: Value = match payload {
        Some(Json(payload)) => payload,
        None => return reject(StatusCode::BAD_REQUEST, "Missing payload"),
    };

    // Cheap sanity check before spending an upstream round trip
    if let Some(email) = body["email"].as_str() {
        if !valid_email(email) {
            return reject(StatusCode::BAD_REQUEST, CONFIRM_EMAIL_FAILED);
        }
    }

    let outcome = state
        .upstream
        .call(Method::POST, "/Auth/confirm-email", Some(&body), None)
        .await;

    reply(normalize(outcome, FailurePolicy::fixed(CONFIRM_EMAIL_FAILED)))
}

#[utoipa::path(
    post,
    path = "/api/auth/verify-token",
    responses(
        (status = 200, description = "Upstream response passed through"),
        (status = 400, description = "OTP invalid or expired"),
        (status = 500, description = "Upstream unreachable")
    ),
    tag = "auth"
)]
pub async fn verify_token(
    state: Extension<Arc<PortalState>>,
    payload: Option<Json<Value>>,
) -> impl IntoResponse {
    let body: Value = match payload {
        Some(Json(payload)) => payload,
        None => return reject(StatusCode::BAD_REQUEST, "Missing payload"),
    };

    let outcome = state
        .upstream
        .call(Method::POST, "/Auth/verify-token", Some(&body), None)
        .await;

    reply(normalize(outcome, FailurePolicy::fixed(VERIFY_TOKEN_FAILED)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Session issued, upstream response passed through"),
        (status = 400, description = "Credentials rejected"),
        (status = 500, description = "Upstream unreachable")
    ),
    tag = "auth"
)]
pub async fn login(
    state: Extension<Arc<PortalState>>,
    payload: Option<Json<Value>>,
) -> impl IntoResponse {
    let body: Value = match payload {
        Some(Json(payload)) => payload,
        None => return reject(StatusCode::BAD_REQUEST, "Missing payload"),
    };

    let outcome = state
        .upstream
        .call(Method::POST, "/Auth/login", Some(&body), None)
        .await;

    match outcome {
        UpstreamOutcome::Success(upstream_body) => {
            let token = upstream_body["token"]
                .as_str()
                .or_else(|| upstream_body["data"]["token"].as_str());

            let mut headers = HeaderMap::new();
            match token {
                // An upstream token carrying cookie separators never reaches
                // the Set-Cookie header
                Some(token) if !session::valid_token_value(token) => {
                    error!("Login response carried a malformed session token");

                    return reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
                }
                Some(token) => match session::issue_cookie(state.cookies, token) {
                    Ok(cookie) => {
                        headers.insert(SET_COOKIE, cookie);
                    }
                    Err(err) => {
                        error!("Failed to build session cookie: {}", err);

                        return reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
                    }
                },
                None => warn!("Login response carried no token, no session issued"),
            }

            (StatusCode::OK, headers, Json(upstream_body)).into_response()
        }
        outcome => reply(normalize(outcome, FailurePolicy::fixed(LOGIN_FAILED))),
    }
}

/// Local-only operation: clears the session cookie and always succeeds.
/// No upstream call is made.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(state: Extension<Arc<PortalState>>) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    match session::clear_cookie(state.cookies) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clearing cookie: {}", err),
    }

    (
        StatusCode::OK,
        headers,
        Json(json!({ "message": "Logged out" })),
    )
        .into_response()
}
