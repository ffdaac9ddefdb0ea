//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user matches the lookup
    #[error("User not found")]
    UserNotFound,

    /// Email already registered
    #[error("User {0} already exists")]
    EmailTaken(String),

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session id missing, malformed or unknown
    #[error("Session not found")]
    SessionInvalid,

    /// Reset token missing, malformed or already consumed
    #[error("Invalid reset token")]
    ResetTokenInvalid,

    /// Reset token requested for an absent or unregistered email
    #[error("Password reset not allowed")]
    ResetNotAllowed,

    /// Required form field absent
    #[error("{0} missing")]
    MissingField(&'static str),

    /// Input rejected by a value object
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::SessionInvalid
            | AuthError::ResetTokenInvalid
            | AuthError::ResetNotAllowed => StatusCode::FORBIDDEN,
            AuthError::MissingField(_) | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken(_)
            | AuthError::MissingField(_)
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::SessionInvalid
            | AuthError::ResetTokenInvalid
            | AuthError::ResetNotAllowed => ErrorKind::Forbidden,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the log, not in the response body.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::ResetTokenInvalid => {
                tracing::warn!("Password update with invalid reset token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err.message().to_string())
        }
    }
}
