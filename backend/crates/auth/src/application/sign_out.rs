//! Sign Out Use Case
//!
//! Clears the session id of a user.

use std::sync::Arc;

use crate::domain::entity::user::UserChanges;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> SignOutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Invalidate the current session of `user_id`
    ///
    /// Idempotent; an unknown user is `UserNotFound`.
    pub async fn destroy_session(&self, user_id: &UserId) -> AuthResult<()> {
        self.repo
            .update_user(user_id, UserChanges::session(None))
            .await?;

        tracing::info!(user_id = %user_id, "Session destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::register_user::RegisterUserUseCase;
    use crate::application::sign_in::SignInUseCase;
    use crate::domain::entity::user::UserLookup;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_destroy_session() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::default());
        let user = RegisterUserUseCase::new(repo.clone(), config.clone())
            .execute("bob@bob.com", "pwd")
            .await
            .unwrap();
        let session_id = SignInUseCase::new(repo.clone(), config)
            .create_session("bob@bob.com")
            .await
            .unwrap()
            .unwrap();

        let use_case = SignOutUseCase::new(repo.clone());
        use_case.destroy_session(&user.user_id).await.unwrap();
        // Second call is a no-op
        use_case.destroy_session(&user.user_id).await.unwrap();

        assert!(repo
            .find_user_by(UserLookup::SessionId(session_id))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_destroy_session_unknown_user() {
        let use_case = SignOutUseCase::new(Arc::new(InMemoryUserRepository::new()));
        assert!(matches!(
            use_case.destroy_session(&UserId::new()).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
