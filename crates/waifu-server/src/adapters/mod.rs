//! Infrastructure Adapters
//!
//! Implementations of the domain ports:
//! - `openai`: LlmProvider over the OpenAI chat completions API
//!
//! The Publisher implementation lives in `waifu-integration-twitter`.

mod openai;

pub use openai::OpenAiProvider;
