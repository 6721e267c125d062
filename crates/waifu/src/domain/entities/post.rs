//! Post Record
//!
//! The composed text of one scheduled post. Never persisted.

use chrono::{DateTime, TimeZone};

/// Publish API length limit, in characters
pub const MAX_POST_CHARS: usize = 280;

/// Timestamp layout appended to every scheduled post
pub const POST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub text: String,
}

impl PostRecord {
    /// Concatenate a template with a formatted timestamp
    pub fn compose<Tz>(template: &str, at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            text: format!("{} {}", template, at.format(POST_TIMESTAMP_FORMAT)),
        }
    }

    /// Length in Unicode scalar values
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn fits(&self, limit: usize) -> bool {
        self.char_count() <= limit
    }
}
