//! Chat Routes - relay to the completion provider

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use waifu::{ChatRequest, CompletionOptions};

use crate::error::ApiError;
use crate::models::{ChatRequestBody, ChatResponse, ErrorResponse};
use crate::AppState;

/// Relay a chat message
///
/// The caller's `prompt` becomes the system instruction and `message` the
/// user turn. Upstream failures are logged and reported only as a generic 500.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "Completion text", body = ChatResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "Unreadable chat body");
            return Err(ApiError::MissingFields);
        }
    };

    let chat = ChatRequest::from(body).validate().map_err(|_| {
        tracing::warn!("Chat request missing required fields");
        ApiError::MissingFields
    })?;

    tracing::info!(
        waifu = %chat.waifu,
        message_chars = chat.message.chars().count(),
        provider = state.llm.provider_name(),
        model = state.llm.model_id(),
        "💬 Relaying chat message"
    );

    let completion = state
        .llm
        .complete(&chat.to_messages(), &CompletionOptions::default())
        .await
        .map_err(|e| {
            tracing::error!(waifu = %chat.waifu, error = %e, "❌ Chat completion failed");
            ApiError::Upstream
        })?;

    tracing::info!(
        waifu = %chat.waifu,
        total_tokens = completion.usage.total_tokens,
        finish_reason = completion.finish_reason.as_deref().unwrap_or("unknown"),
        "✅ Chat completion received"
    );

    Ok(Json(ChatResponse {
        response: completion.content,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(chat))
}
