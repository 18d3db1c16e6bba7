//! OpenAPI document for the proxy surface.

use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use super::handlers::{auth, dashboard, health, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::confirm_email,
        auth::verify_token,
        auth::login,
        auth::logout,
        dashboard::dashboard,
        users::list,
    ),
    components(schemas(health::Health)),
    tags(
        (name = "auth", description = "Session and authentication proxy"),
        (name = "subscription", description = "Subscription dashboard proxy"),
        (name = "users", description = "User directory proxy"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub async fn serve() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
