//! Waifu Chat Data Models
//!
//! - Chat: relay request/response bodies
//! - Health: liveness probe body

mod chat;
mod health;

pub use chat::*;
pub use health::*;
