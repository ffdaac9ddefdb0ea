//! API DTOs (Data Transfer Objects)
//!
//! Requests are form-encoded. Every field is optional so that a missing
//! field reaches the handler and gets the status the route documents,
//! instead of a generic extractor rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

/// Email and password (registration and login)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Reset token request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetPasswordForm {
    pub email: Option<String>,
}

/// Password update with a reset token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePasswordForm {
    pub email: Option<String>,
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

/// Present and non-empty form value
pub fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Email plus a status message
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessageResponse {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetTokenResponse {
    pub email: String,
    pub reset_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// v1 API error body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Public view of a user (never includes credentials)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            email: user.email.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
