//! Poster tick types

use serde::{Deserialize, Serialize};

/// Result of one scheduled poster tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TickOutcome {
    /// The post was published
    Posted { id: String },
    /// The composed text exceeded the length limit; nothing was sent
    Skipped { chars: usize },
    /// The publish call failed
    Failed { error: String },
}

/// Scheduled poster state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterState {
    /// Waiting for the next tick
    #[default]
    Idle,
    /// Publish call in flight; never entered by a skipped tick
    Posting,
}

impl std::fmt::Display for PosterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PosterState::Idle => write!(f, "idle"),
            PosterState::Posting => write!(f, "posting"),
        }
    }
}
