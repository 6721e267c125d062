//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{ChatRequestBody, ChatResponse, ErrorResponse, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::root,
        super::health::health_check,
        super::chat::chat,
    ),
    components(schemas(ChatRequestBody, ChatResponse, ErrorResponse, HealthResponse)),
    tags(
        (name = "Health", description = "Liveness and health probes"),
        (name = "Chat", description = "Chat relay to the completion provider")
    ),
    info(
        title = "Waifu Chat API",
        description = "Chat relay and scheduled poster"
    )
)]
pub struct ApiDoc;
