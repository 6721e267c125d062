//! Domain Entities
//!
//! - ChatRequest: inbound chat relay request
//! - PostRecord: composed text of one scheduled post

mod chat;
mod post;

pub use chat::*;
pub use post::*;
