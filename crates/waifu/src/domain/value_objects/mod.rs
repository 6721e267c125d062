//! Value Objects
//!
//! Immutable types shared by the poster and its callers.

mod message_pool;
mod tick;

pub use message_pool::*;
pub use tick::*;
