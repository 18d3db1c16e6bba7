//! User directory proxy endpoint (protected).

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

const USERS_FAILED: &str = "Failed to fetch users";

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "User list passed through"),
        (status = 401, description = "No session"),
        (status = 500, description = "Upstream unreachable")
    ),
    tag = "users"
)]
pub async fn list(state: Extension<Arc<PortalState>>, headers: HeaderMap) -> impl IntoResponse {
    // No session means no upstream call at all
    let Some(token) = session::read_token(&headers) else {
        return reject(StatusCode::UNAUTHORIZED, "Unauthorized");
    };

    let outcome = state
        .upstream
        .call(Method::GET, "/User", None, Some(&token))
        .await;

    reply(normalize(outcome, FailurePolicy::with_detail(USERS_FAILED)))
}
