//! X/Twitter API client

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use reqwest_oauth1::{OAuthClientProvider, Secrets};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::TwitterConfig;
use crate::error::TwitterError;

/// A created tweet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

#[derive(Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: Tweet,
}

/// Twitter API client
pub struct TwitterClient {
    http: Client,
    config: TwitterConfig,
}

impl TwitterClient {
    /// Create a new Twitter client
    pub fn new(config: TwitterConfig) -> Result<Self, TwitterError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("waifu-chat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Publish a text-only tweet
    ///
    /// The request is signed with OAuth 1.0a user context. The JSON body is
    /// not part of the signature on v2 endpoints.
    pub async fn post_tweet(&self, text: &str) -> Result<Tweet, TwitterError> {
        let secrets = Secrets::new(self.config.api_key.as_str(), self.config.api_secret.as_str())
            .token(
                self.config.access_token.as_str(),
                self.config.access_secret.as_str(),
            );
        let body = serde_json::to_vec(&CreateTweetRequest { text })
            .map_err(|e| TwitterError::Decode(e.to_string()))?;
        debug!(content_len = %text.chars().count(), "Posting tweet");

        let response = self
            .http
            .clone()
            .oauth1(secrets)
            .post(self.config.tweets_url())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to reach Twitter API"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status.as_u16(), body = %body, "Twitter API rejected tweet");
            return Err(TwitterError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreateTweetResponse = response
            .json()
            .await
            .map_err(|e| TwitterError::Decode(e.to_string()))?;

        Ok(created.data)
    }
}
