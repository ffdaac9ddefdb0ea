//! Reset Password Use Case
//!
//! Issues one-time reset tokens and consumes them to set a new password.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{UserChanges, UserLookup};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    token::{ResetToken, parse_token},
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Reset password use case
pub struct ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Store a new reset token on the user registered as `email`
    ///
    /// A second request replaces the pending token. Unknown emails are
    /// `UserNotFound`.
    pub async fn get_reset_password_token(&self, email: &str) -> AuthResult<ResetToken> {
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .repo
            .find_user_by(UserLookup::Email(email))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let reset_token = ResetToken::new();
        self.repo
            .update_user(&user.user_id, UserChanges::reset_token(reset_token))
            .await?;

        tracing::info!(user_id = %user.user_id, "Reset token issued");

        Ok(reset_token)
    }

    /// Replace the password of the user holding `reset_token`
    ///
    /// The token is cleared in the same update, so it works only once.
    pub async fn update_password(&self, reset_token: &str, password: &str) -> AuthResult<()> {
        let reset_token: ResetToken =
            parse_token(Some(reset_token)).ok_or(AuthError::ResetTokenInvalid)?;

        let user = self
            .repo
            .find_user_by(UserLookup::ResetToken(reset_token))
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        let raw_password = RawPassword::new(password.to_string())?;
        let hashed_password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        self.repo
            .update_user(&user.user_id, UserChanges::password_reset(hashed_password))
            .await?;

        tracing::info!(user_id = %user.user_id, "Password updated");

        Ok(())
    }
}
