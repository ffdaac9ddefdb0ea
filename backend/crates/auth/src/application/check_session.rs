//! Check Session Use Case
//!
//! Resolves a session id sent by a client to its user.

use std::sync::Arc;

use crate::domain::entity::user::{User, UserLookup};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::token::{SessionId, parse_token};
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CheckSessionUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// User owning `session_id`
    ///
    /// Missing, malformed and unknown ids all yield `None`.
    pub async fn get_user_from_session_id(
        &self,
        session_id: Option<&str>,
    ) -> AuthResult<Option<User>> {
        let Some(session_id) = parse_token(session_id) else {
            return Ok(None);
        };
        self.find(session_id).await
    }

    async fn find(&self, session_id: SessionId) -> AuthResult<Option<User>> {
        self.repo.find_user_by(UserLookup::SessionId(session_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::register_user::RegisterUserUseCase;
    use crate::application::sign_in::SignInUseCase;
    use crate::infra::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_get_user_from_session_id() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::default());
        RegisterUserUseCase::new(repo.clone(), config.clone())
            .execute("bob@bob.com", "pwd")
            .await
            .unwrap();
        let session_id = SignInUseCase::new(repo.clone(), config)
            .create_session("bob@bob.com")
            .await
            .unwrap()
            .unwrap();

        let use_case = CheckSessionUseCase::new(repo);
        let user = use_case
            .get_user_from_session_id(Some(&session_id.to_string()))
            .await
            .unwrap();
        assert_eq!(user.map(|u| u.email.to_string()), Some("bob@bob.com".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_session_ids() {
        let use_case = CheckSessionUseCase::new(Arc::new(InMemoryUserRepository::new()));

        assert!(use_case.get_user_from_session_id(None).await.unwrap().is_none());
        assert!(use_case.get_user_from_session_id(Some("")).await.unwrap().is_none());
        assert!(use_case
            .get_user_from_session_id(Some("garbage"))
            .await
            .unwrap()
            .is_none());
        assert!(use_case
            .get_user_from_session_id(Some(&SessionId::new().to_string()))
            .await
            .unwrap()
            .is_none());
    }
}
