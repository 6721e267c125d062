//! Waifu Chat Domain Library
//!
//! Core domain types and interfaces for the waifu chat relay.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: Chat requests and scheduled post records
//!   - `value_objects/`: Immutable value types (MessagePool, TickOutcome, PosterState)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: Completion provider and publish API interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use waifu::domain::{ChatRequest, MessagePool};
//! use waifu::ports::{LlmProvider, Publisher};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ChatRequest, DomainError, MessagePool, PostRecord, PosterState, TickOutcome, ValidatedChat,
    MAX_POST_CHARS,
};
pub use ports::{
    ChatMessage, CompletionOptions, CompletionResponse, LlmProvider, MessageRole, PublishedPost,
    Publisher, TokenUsage,
};
