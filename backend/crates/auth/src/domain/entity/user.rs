//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email,
    token::{ResetToken, SessionId},
    user_id::UserId,
    user_password::UserPassword,
};

/// A registered user and its credentials
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, normalized
    pub email: Email,
    pub hashed_password: UserPassword,
    /// Set while logged in to the user service
    pub session_id: Option<SessionId>,
    /// Set between a reset request and the password update
    pub reset_token: Option<ResetToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with no session and no pending reset
    pub fn new(email: Email, hashed_password: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            hashed_password,
            session_id: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, bumping `updated_at`
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(hashed_password) = changes.hashed_password {
            self.hashed_password = hashed_password;
        }
        if let Some(session_id) = changes.session_id {
            self.session_id = session_id;
        }
        if let Some(reset_token) = changes.reset_token {
            self.reset_token = reset_token;
        }
        self.updated_at = Utc::now();
    }
}

/// Attributes a lookup can filter on
#[derive(Debug, Clone)]
pub enum UserLookup {
    Id(UserId),
    Email(Email),
    SessionId(SessionId),
    ResetToken(ResetToken),
}

/// Partial update of a user
///
/// `None` leaves a column untouched. For nullable columns the inner `Option`
/// is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub hashed_password: Option<UserPassword>,
    pub session_id: Option<Option<SessionId>>,
    pub reset_token: Option<Option<ResetToken>>,
}

impl UserChanges {
    pub fn session(session_id: Option<SessionId>) -> Self {
        Self {
            session_id: Some(session_id),
            ..Self::default()
        }
    }

    pub fn reset_token(reset_token: ResetToken) -> Self {
        Self {
            reset_token: Some(Some(reset_token)),
            ..Self::default()
        }
    }

    /// New password; consumes the pending reset token
    pub fn password_reset(hashed_password: UserPassword) -> Self {
        Self {
            hashed_password: Some(hashed_password),
            reset_token: Some(None),
            ..Self::default()
        }
    }
}
