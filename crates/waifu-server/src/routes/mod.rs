//! Waifu Chat API Routes
//!
//! - / - plain-text liveness
//! - /health - health probe
//! - /api/chat - chat relay to the completion provider

pub mod chat;
pub mod health;
pub mod swagger;
