//! Chat Entity
//!
//! A chat relay request as received from a client, before and after
//! the presence check.

use crate::domain::errors::DomainError;
use crate::ports::services::ChatMessage;

/// Message returned to clients when any chat field is absent or empty
pub const MISSING_FIELDS: &str = "Missing required fields";

/// Inbound chat request. Every field is optional at this stage so that
/// a missing field is a validation error rather than a decode failure.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// Persona name. Accepted and logged, not sent upstream.
    pub waifu: Option<String>,
    /// User-role content
    pub message: Option<String>,
    /// System-role instruction
    pub prompt: Option<String>,
}

/// A chat request with all three fields present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedChat {
    pub waifu: String,
    pub message: String,
    pub prompt: String,
}

impl ChatRequest {
    pub fn new(
        waifu: impl Into<String>,
        message: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            waifu: Some(waifu.into()),
            message: Some(message.into()),
            prompt: Some(prompt.into()),
        }
    }

    /// Check that `waifu`, `message` and `prompt` are all present and non-empty.
    ///
    /// Only presence is checked; content and length are passed through as-is.
    pub fn validate(self) -> Result<ValidatedChat, DomainError> {
        match (
            non_empty(self.waifu),
            non_empty(self.message),
            non_empty(self.prompt),
        ) {
            (Some(waifu), Some(message), Some(prompt)) => Ok(ValidatedChat {
                waifu,
                message,
                prompt,
            }),
            _ => Err(DomainError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

impl ValidatedChat {
    /// Build the upstream conversation: the prompt as system instruction,
    /// then the user's message.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.prompt.as_str()),
            ChatMessage::user(self.message.as_str()),
        ]
    }
}
