//! X/Twitter Integration for Waifu Chat
//!
//! Publishes scheduled posts through the v2 `POST /2/tweets` endpoint,
//! signing each request with OAuth 1.0a user-context credentials
//! (via `reqwest-oauth1`).
//!
//! # Usage
//!
//! ```rust,ignore
//! use waifu_integration_twitter::{TwitterConfig, TwitterPublisher};
//!
//! let config = TwitterConfig::new(api_key, api_secret, access_token, access_secret);
//! let publisher = TwitterPublisher::new(config)?;
//! publisher.publish("hello").await?;
//! ```

mod client;
mod config;
mod error;
mod integration;

pub use client::{Tweet, TwitterClient};
pub use config::TwitterConfig;
pub use error::TwitterError;
pub use integration::TwitterPublisher;
