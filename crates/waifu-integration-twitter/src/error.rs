//! Twitter integration errors

use thiserror::Error;
use waifu::DomainError;

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Signed request failed: {0}")]
    Request(#[from] reqwest_oauth1::Error),

    #[error("Twitter API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<TwitterError> for DomainError {
    fn from(e: TwitterError) -> Self {
        DomainError::ExternalService(format!("Twitter: {e}"))
    }
}
