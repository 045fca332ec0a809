//! Error types for the gist proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the proxy service and HTTP API.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Upstream reports the owner does not exist
    #[error("User '{0}' not found")]
    NotFound(String),

    /// Upstream rate limit or quota exceeded
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Upstream call timed out
    #[error("GitHub API timeout")]
    UpstreamTimeout,

    /// Upstream returned some other non-success status
    #[error("GitHub error: {0}")]
    UpstreamStatus(u16),

    /// Request rejected before reaching the service
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected failure; the detail is logged, never returned to callers
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status this error is surfaced with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamStatus(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to callers.
    pub fn public_message(&self) -> String {
        match self {
            ProxyError::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
