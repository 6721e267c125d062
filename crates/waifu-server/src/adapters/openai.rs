//! OpenAI Completion Provider
//!
//! Sends one chat completion request per call. The API key is only ever
//! written into the `Authorization` header.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use waifu::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider, TokenUsage,
};

use crate::config::DEFAULT_OPENAI_BASE_URL;

/// OpenAI chat completions client
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl OpenAiProvider {
    /// Create a provider against the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        })
    }

    /// Use any OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn upstream_error(detail: impl std::fmt::Display) -> DomainError {
        DomainError::ExternalService(format!("OpenAI: {detail}"))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        debug!(model = %self.model, messages = messages.len(), "Calling chat completions API");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Chat completion request failed");
                Self::upstream_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status.as_u16(), body = %body, "Chat completions API returned error");
            return Err(DomainError::upstream_status("OpenAI", status.as_u16(), &body));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Malformed chat completion response");
            Self::upstream_error(e)
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            error!("Chat completion response had no choices");
            Self::upstream_error("no choices returned")
        })?;

        let content = choice.message.content.ok_or_else(|| {
            error!("First completion choice had no content");
            Self::upstream_error("empty message content")
        })?;

        let usage = parsed
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: parsed.model.unwrap_or_else(|| self.model.clone()),
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn spawn_fake(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn conversation() -> Vec<ChatMessage> {
        vec![ChatMessage::system("You are Aiko"), ChatMessage::user("hi")]
    }

    async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            == Some("Bearer sk-test");
        let shaped = body["model"] == "gpt-test"
            && body["messages"][0]["role"] == "system"
            && body["messages"][0]["content"] == "You are Aiko"
            && body["messages"][1]["role"] == "user"
            && body["messages"][1]["content"] == "hi";
        // The key travels only in the header
        let leaked = body.to_string().contains("sk-test");

        if !authorized || !shaped || leaked {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": { "message": "bad request" } })));
        }

        (
            StatusCode::OK,
            Json(json!({
                "id": "chatcmpl-1",
                "model": "gpt-test-0613",
                "choices": [
                    { "index": 0, "message": { "role": "assistant", "content": "Hello!" }, "finish_reason": "stop" }
                ],
                "usage": { "prompt_tokens": 12, "completion_tokens": 2, "total_tokens": 14 }
            })),
        )
    }

    fn provider(base: String) -> OpenAiProvider {
        OpenAiProvider::new("sk-test", "gpt-test")
            .unwrap()
            .with_base_url(base)
    }

    #[tokio::test]
    async fn test_complete_extracts_first_choice() {
        let base = spawn_fake(Router::new().route("/v1/chat/completions", post(echo_completion))).await;

        let response = provider(base)
            .complete(&conversation(), &CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(response.content, "Hello!");
        assert_eq!(response.model, "gpt-test-0613");
        assert_eq!(response.usage.total_tokens, 14);
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_external_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": { "message": "Rate limit reached" } })),
                )
            }),
        );
        let base = spawn_fake(router).await;

        let err = provider(base)
            .complete(&conversation(), &CompletionOptions::default())
            .await
            .unwrap_err();

        match err {
            DomainError::ExternalService(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("Rate limit reached"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_external_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base = spawn_fake(router).await;

        let err = provider(base)
            .complete(&conversation(), &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_external_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { "definitely not json" }),
        );
        let base = spawn_fake(router).await;

        let err = provider(base)
            .complete(&conversation(), &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
    }

    #[test]
    fn test_identity() {
        let provider = OpenAiProvider::new("sk", "gpt-3.5-turbo").unwrap();
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model_id(), "gpt-3.5-turbo");
    }
}
