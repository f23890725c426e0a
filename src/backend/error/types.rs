/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised directly by handlers with an explicit status code and the message
 * the client displays: missing fields, unknown boards, bad credentials.
 *
 * ## Validation Errors
 *
 * Field checks shared with the client (`SharedError`) and batch move
 * validation (`BatchError`). These map to 400, or 404 when a referenced
 * list or task does not exist.
 *
 * ## Internal Errors
 *
 * Database, hashing and token failures. The client only ever sees a generic
 * message; the details are logged when the response is built.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::tasks::batch::BatchError;
use crate::shared::SharedError;

/// Message returned for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use taskboard::backend::error::BackendError;
///
/// let err = BackendError::not_found("Board not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request-level failure with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Message shown to the client
        message: String,
    },

    /// Field validation failure
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Batch move rejected
    #[error(transparent)]
    BatchError(#[from] BatchError),

    /// Storage failure
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Token signing or verification failure
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    HashError(#[from] bcrypt::BcryptError),
}

impl BackendError {
    /// Create a handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - `BatchError` - 404 for missing lists/tasks, 400 otherwise
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::BatchError(err) => {
                if err.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::BAD_REQUEST
                }
            }
            Self::DatabaseError(_) | Self::TokenError(_) | Self::HashError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the response envelope
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.user_message().to_string(),
            Self::BatchError(err) => err.to_string(),
            Self::DatabaseError(_)
            | Self::TokenError(_)
            | Self::HashError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
