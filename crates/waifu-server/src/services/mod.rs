//! Background services
//!
//! - poster: scheduled social-media posts
//! - memory: periodic process memory snapshot

pub mod memory;
pub mod poster;
