//! Publisher implementation for X/Twitter

use async_trait::async_trait;
use tracing::debug;
use waifu::{DomainError, PublishedPost, Publisher};

use crate::client::TwitterClient;
use crate::config::TwitterConfig;

/// Twitter integration implementing the Publisher port
pub struct TwitterPublisher {
    client: TwitterClient,
}

impl TwitterPublisher {
    pub fn new(config: TwitterConfig) -> Result<Self, DomainError> {
        let client = TwitterClient::new(config)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    async fn publish(&self, text: &str) -> Result<PublishedPost, DomainError> {
        let tweet = self.client.post_tweet(text).await?;
        debug!(tweet_id = %tweet.id, "Tweet created");

        Ok(PublishedPost {
            id: tweet.id,
            text: tweet.text,
        })
    }

    fn name(&self) -> &str {
        "twitter"
    }
}
