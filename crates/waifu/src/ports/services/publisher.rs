//! Publisher Port
//!
//! Abstract interface for a social-media "publish text" operation.
//! Platform implementations live in separate crates
//! (e.g., waifu-integration-twitter).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// A post accepted by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPost {
    /// Platform-specific post ID
    pub id: String,
    /// Text as stored by the platform
    pub text: String,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish a single text post
    async fn publish(&self, text: &str) -> Result<PublishedPost, DomainError>;

    /// Platform name (e.g., "twitter")
    fn name(&self) -> &str;
}
