//! Subscription dashboard proxy endpoint (protected).

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use reqwest::Method;
use std::sync::Arc;

use super::{reject, reply, session};
use crate::portal::PortalState;
use crate::upstream::{normalize, FailurePolicy};

const DASHBOARD_FAILED: &str = "Failed to fetch dashboard";

#[utoipa::path(
    get,
    path = "/api/subscription/dashboard",
    responses(
        (status = 200, description = "Dashboard data passed through"),
        (status = 401, description = "No session"),
        (status = 500, description = "Upstream unreachable")
    ),
    tag = "subscription"
)]
pub async fn dashboard(
    state: Extension<Arc<PortalState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // No session means no upstream call at all
    let Some(token) = session::read_token(&headers) else {
        return reject(StatusCode::UNAUTHORIZED, "Unauthorized");
    };

    let outcome = state
        .upstream
        .call(Method::GET, "/Subscription/dashboard", None, Some(&token))
        .await;

    reply(normalize(
        outcome,
        FailurePolicy::with_detail(DASHBOARD_FAILED),
    ))
}
