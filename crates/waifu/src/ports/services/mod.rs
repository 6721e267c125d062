//! Service Ports
//!
//! Abstract interfaces for external services.

mod llm_provider;
mod publisher;

pub use llm_provider::*;
pub use publisher::*;
