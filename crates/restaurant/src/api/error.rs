//! Interface errors and their status codes.

use crate::admin_actor::AuthError;
use crate::api::ApiResponse;
use crate::order_actor::OrderError;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Conflict(String),
    /// Details are logged, not returned.
    #[error("Server error")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `{"error": ...}`, plus `"ok": false` for authentication failures.
    pub fn into_response(self) -> ApiResponse {
        let status = self.status();
        match &self {
            ApiError::Storage(detail) => {
                error!(status = status.as_u16(), %detail, "Request failed")
            }
            other => warn!(status = status.as_u16(), error = %other, "Request rejected"),
        }
        let body = match self {
            ApiError::Unauthorized(message) => json!({ "ok": false, "error": message }),
            other => json!({ "error": other.to_string() }),
        };
        ApiResponse::new(status, body)
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => ApiError::NotFound("Not found".into()),
            OrderError::ValidationError(message) => ApiError::Validation(message),
            e @ OrderError::InvalidTransition { .. } => ApiError::Conflict(e.to_string()),
            OrderError::ActorCommunicationError(detail) => ApiError::Storage(detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            e @ (AuthError::NotConfigured | AuthError::AlreadyConfigured) => {
                ApiError::Conflict(e.to_string())
            }
            e @ AuthError::PasswordTooShort { .. } => ApiError::Validation(e.to_string()),
            e @ (AuthError::InvalidCredentials
            | AuthError::InvalidSession
            | AuthError::SessionExpired) => ApiError::Unauthorized(e.to_string()),
            AuthError::Hashing(detail)
            | AuthError::InvalidSessionTtl(detail)
            | AuthError::ActorCommunicationError(detail) => ApiError::Storage(detail),
        }
    }
}
