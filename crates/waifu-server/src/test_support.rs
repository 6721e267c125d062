//! Stub ports and app wiring shared by unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use waifu::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider, PublishedPost,
    Publisher, TokenUsage,
};

use crate::config::ServerConfig;
use crate::rate_limit::IpRateLimiter;
use crate::{build_router, AppState};

pub fn test_config(extra: &[(&str, &str)]) -> ServerConfig {
    let extra: Vec<(String, String)> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(move |key| {
        if key == "OPENAI_API_KEY" {
            return Some("sk-test".to_string());
        }
        extra.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    })
    .unwrap()
}

pub fn test_app_with_config(provider: Arc<dyn LlmProvider>, config: &ServerConfig) -> Router {
    let limiter = Arc::new(IpRateLimiter::new(&config.rate_limit));
    build_router(AppState { llm: provider }, config, limiter)
}

pub fn test_app(provider: Arc<StubProvider>) -> Router {
    test_app_with_config(provider, &test_config(&[]))
}

/// LlmProvider that answers from memory and counts calls
pub struct StubProvider {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_messages: Mutex<Option<Vec<ChatMessage>>>,
}

impl StubProvider {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing(error: &str) -> Self {
        Self::with_reply(Err(error.to_string()))
    }

    fn with_reply(reply: Result<String, String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = Some(messages.to_vec());

        match &self.reply {
            Ok(text) => Ok(CompletionResponse {
                content: text.clone(),
                model: "stub".to_string(),
                usage: TokenUsage::default(),
                finish_reason: Some("stop".to_string()),
            }),
            Err(e) => Err(DomainError::ExternalService(e.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_id(&self) -> &str {
        "stub"
    }
}

/// Publisher that records posts, optionally failing or taking time
pub struct StubPublisher {
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl StubPublisher {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for StubPublisher {
    async fn publish(&self, text: &str) -> Result<PublishedPost, DomainError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_text.lock().unwrap() = Some(text.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(DomainError::ExternalService("publish rejected".to_string()));
        }
        Ok(PublishedPost {
            id: n.to_string(),
            text: text.to_string(),
        })
    }

    fn name(&self) -> &str {
        "stub"
    }
}
