//! Health Routes

use axum::{routing::get, Json, Router};

use crate::models::HealthResponse;
use crate::AppState;

pub const LIVENESS_TEXT: &str = "Waifu Chat relay is running 💕";

/// Liveness string
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Server is running", body = String, content_type = "text/plain")),
    tag = "Health"
)]
pub async fn root() -> &'static str {
    LIVENESS_TEXT
}

/// Health probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is healthy", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
