//! API error envelopes
//!
//! Every failure leaves the server as `{"error": "<fixed message>"}`.
//! Upstream details are logged where they occur and never reach the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use waifu::domain::entities::MISSING_FIELDS;

use crate::models::ErrorResponse;

pub const GENERIC_FAILURE: &str = "Something went wrong";
pub const RATE_LIMITED: &str = "Too many requests, please try again later.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", MISSING_FIELDS)]
    MissingFields,

    #[error("{}", GENERIC_FAILURE)]
    Upstream,

    #[error("{}", RATE_LIMITED)]
    RateLimited,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
