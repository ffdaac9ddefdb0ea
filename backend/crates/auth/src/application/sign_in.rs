//! Sign In Use Case
//!
//! Checks credentials and opens a session on the user row.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{User, UserChanges, UserLookup};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, token::SessionId, user_password::RawPassword,
};
use crate::error::AuthResult;

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Whether `password` is the password of the user registered as `email`
    ///
    /// Unknown emails and unusable input are simply `false`.
    pub async fn valid_login(&self, email: &str, password: &str) -> AuthResult<bool> {
        Ok(self.authenticate(email, password).await?.is_some())
    }

    /// User registered as `email` if `password` matches
    pub async fn authenticate(&self, email: &str, password: &str) -> AuthResult<Option<User>> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        let Ok(raw_password) = RawPassword::new(password.to_string()) else {
            return Ok(None);
        };

        if user.hashed_password.verify(&raw_password, self.config.pepper()) {
            Ok(Some(user))
        } else {
            tracing::debug!(user_id = %user.user_id, "Password mismatch");
            Ok(None)
        }
    }

    /// Store a new session id on the user registered as `email`
    ///
    /// Returns `None` for an unknown email. Any previous session of that
    /// user is replaced.
    pub async fn create_session(&self, email: &str) -> AuthResult<Option<SessionId>> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        let session_id = SessionId::new();
        self.repo
            .update_user(&user.user_id, UserChanges::session(Some(session_id)))
            .await?;

        tracing::info!(user_id = %user.user_id, "Session created");

        Ok(Some(session_id))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };
        self.repo.find_user_by(UserLookup::Email(email)).await
    }
}
