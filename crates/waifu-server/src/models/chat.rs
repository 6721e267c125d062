//! Chat DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use waifu::ChatRequest;

/// Chat relay request. All three fields are required; absence is reported
/// as a 400 rather than a decode error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ChatRequestBody {
    /// Persona name (logged, not sent upstream)
    #[schema(example = "Aiko")]
    pub waifu: Option<String>,
    /// User message
    #[schema(example = "hi")]
    pub message: Option<String>,
    /// System prompt describing the persona
    #[schema(example = "You are Aiko")]
    pub prompt: Option<String>,
}

impl From<ChatRequestBody> for ChatRequest {
    fn from(body: ChatRequestBody) -> Self {
        Self {
            waifu: body.waifu,
            message: body.message,
            prompt: body.prompt,
        }
    }
}

/// Successful chat relay response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    /// Text of the first completion choice
    #[schema(example = "Hello!")]
    pub response: String,
}

/// Error envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Missing required fields")]
    pub error: String,
}
