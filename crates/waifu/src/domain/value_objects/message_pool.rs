//! Message Pool - canned templates for scheduled posts

use rand::Rng;

use crate::domain::errors::DomainError;

const DEFAULT_TEMPLATES: &[&str] = &[
    "Good morning! Did you remember to drink some water today? 💧",
    "I've been waiting for you to come back and chat with me~ 💕",
    "Take a short break, stretch a little, and come say hi! ✨",
    "Whatever you're working on right now, I believe in you! 💪",
    "It's a perfect time for a cup of tea and a little conversation ☕",
    "Don't forget to smile today, it suits you 😊",
    "New day, new chances. Tell me what you're up to! 🌸",
    "I learned something new today... want to hear about it? 📚",
];

/// Fixed, ordered set of post templates. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePool {
    templates: Vec<String>,
}

impl MessagePool {
    /// Build a pool from templates. An empty pool is rejected.
    pub fn new<I, S>(templates: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let templates: Vec<String> = templates.into_iter().map(Into::into).collect();
        if templates.is_empty() {
            return Err(DomainError::Configuration(
                "message pool must contain at least one template".to_string(),
            ));
        }
        Ok(Self { templates })
    }

    /// Pick a template by uniform random index
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let index = rng.random_range(0..self.templates.len());
        &self.templates[index]
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for MessagePool {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
