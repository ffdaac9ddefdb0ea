//! Register User Use Case
//!
//! Creates a new user from an email and a password.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{User, UserLookup};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register user use case
pub struct RegisterUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Register `email` with a freshly salted hash of `password`
    ///
    /// Fails with `EmailTaken` when the email is already registered.
    pub async fn execute(&self, email: &str, password: &str) -> AuthResult<User> {
        let email = Email::new(email)?;

        if self
            .repo
            .find_user_by(UserLookup::Email(email.clone()))
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken(email.to_string()));
        }

        let raw_password = RawPassword::new(password.to_string())?;
        let hashed_password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // The repository re-checks uniqueness, so a concurrent registration
        // still ends in EmailTaken.
        let user = self.repo.add_user(email, hashed_password).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case() -> RegisterUserUseCase<InMemoryUserRepository> {
        RegisterUserUseCase::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(AuthConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_register_user() {
        let use_case = use_case();
        let user = use_case.execute("me@me.com", "mySecuredPwd").await.unwrap();

        assert_eq!(user.email.as_str(), "me@me.com");
        assert_ne!(user.hashed_password.as_phc_string(), "mySecuredPwd");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let use_case = use_case();
        use_case.execute("me@me.com", "mySecuredPwd").await.unwrap();

        let err = use_case.execute(" me@me.com ", "other").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken(ref email) if email == "me@me.com"));
        assert_eq!(err.to_string(), "User me@me.com already exists");
    }

    #[tokio::test]
    async fn test_register_invalid_input() {
        let use_case = use_case();
        assert!(matches!(
            use_case.execute("  ", "pwd").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            use_case.execute("me@me.com", "   ").await,
            Err(AuthError::Validation(_))
        ));
    }
}
