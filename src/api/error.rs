use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::db::StorageError;
use crate::services::{AuthError, UploadError};

/// Body of every 4xx/5xx response that carries a message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// No session, or the session's user is gone. Plain-text body.
    Unauthorized,

    Forbidden(String),

    /// Empty body.
    NotFound,

    ValidationError(String),

    PayloadTooLarge,

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::NotFound => write!(f, "Not found"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::PayloadTooLarge => write!(f, "Payload too large"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "File too large".to_string()),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UsernameTaken(_) => Self::validation("Username already exists"),
            StorageError::IdsExhausted => Self::InternalError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized,
            AuthError::UsernameTaken => Self::validation("Username already exists"),
            AuthError::Validation(reason) => {
                tracing::debug!(reason = %reason, "Rejected account data");
                Self::validation("Invalid user data")
            }
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { .. } => Self::PayloadTooLarge,
            UploadError::Io(e) => Self::InternalError(format!("Failed to store upload: {e}")),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }
}
