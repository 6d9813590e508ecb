//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::ConfigError;
use crate::generation::GenerationError;

/// Error returned by API handlers, rendered as a JSON body with a
/// matching status code.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown document or resource
    NotFound(String),
    /// Request is valid JSON but cannot be served in this state
    BadRequest(String),
    /// Generation service is rate limited
    RateLimited(String),
    /// Generation service missing or down
    ServiceUnavailable(String),
    /// Anything unexpected
    Internal(String),
}

/// JSON error payload.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::NotFound(m)
            | ApiError::BadRequest(m)
            | ApiError::RateLimited(m)
            | ApiError::ServiceUnavailable(m)
            | ApiError::Internal(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        // Chunking/retrieval settings are validated at startup; hitting
        // this at request time means a service bug, not a client error.
        ApiError::Internal(e.to_string())
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::RateLimited => ApiError::RateLimited(
                "AI usage limit reached. Please try again later.".to_string(),
            ),
            GenerationError::Unavailable => ApiError::ServiceUnavailable(
                "The AI service is temporarily unavailable. Please try again shortly.".to_string(),
            ),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
