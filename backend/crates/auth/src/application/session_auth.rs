//! Session Authentication
//!
//! Session ids kept in process memory and carried in the cookie named by
//! `AuthConfig::api_session_cookie_name`. Sessions do not survive a restart.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use tokio::sync::RwLock;

use crate::application::config::AuthConfig;
use crate::application::request_auth::{Authenticator, session_cookie};
use crate::domain::entity::user::{User, UserLookup};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    token::{SessionId, parse_token},
    user_id::UserId,
};
use crate::error::AuthResult;

/// Session authentication backed by an in-memory session table
pub struct SessionAuth<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    sessions: Arc<RwLock<HashMap<SessionId, UserId>>>,
}

impl<R> Clone for SessionAuth<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

impl<R> SessionAuth<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            config,
            sessions: Arc::default(),
        }
    }

    /// Open a session for `user_id`
    pub async fn create_session(&self, user_id: UserId) -> SessionId {
        let session_id = SessionId::new();
        self.sessions.write().await.insert(session_id, user_id);
        tracing::info!(user_id = %user_id, "API session created");
        session_id
    }

    /// User id behind `session_id`; missing or unknown ids yield `None`
    pub async fn user_id_for_session_id(&self, session_id: Option<&str>) -> Option<UserId> {
        let session_id: SessionId = parse_token(session_id)?;
        self.sessions.read().await.get(&session_id).copied()
    }

    /// Close the session carried by the request cookie
    ///
    /// `false` when there is no cookie or it names no open session.
    pub async fn destroy_session(&self, headers: &HeaderMap) -> bool {
        let cookie = session_cookie(headers, &self.config.api_session_cookie_name);
        let Some(session_id): Option<SessionId> = parse_token(cookie.as_deref()) else {
            return false;
        };

        let removed = self.sessions.write().await.remove(&session_id);
        match removed {
            Some(user_id) => {
                tracing::info!(user_id = %user_id, "API session destroyed");
                true
            }
            None => false,
        }
    }
}

impl<R> Authenticator for SessionAuth<R>
where
    R: UserRepository + Send + Sync,
{
    async fn current_user(&self, headers: &HeaderMap) -> AuthResult<Option<User>> {
        let cookie = session_cookie(headers, &self.config.api_session_cookie_name);
        let Some(user_id) = self.user_id_for_session_id(cookie.as_deref()).await else {
            return Ok(None);
        };
        self.repo.find_user_by(UserLookup::Id(user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register_user::RegisterUserUseCase;
    use crate::infra::memory::InMemoryUserRepository;
    use axum::http::{HeaderValue, header};

    async fn setup() -> (SessionAuth<InMemoryUserRepository>, User) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::default());
        let user = RegisterUserUseCase::new(repo.clone(), config.clone())
            .execute("bob@example.com", "H0lberton")
            .await
            .unwrap();
        (SessionAuth::new(repo, config), user)
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("_my_session_id={value}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_create_and_resolve_session() {
        let (auth, user) = setup().await;
        let session_id = auth.create_session(user.user_id).await;

        assert_eq!(
            auth.user_id_for_session_id(Some(&session_id.to_string())).await,
            Some(user.user_id)
        );
        assert_eq!(auth.user_id_for_session_id(None).await, None);
        assert_eq!(auth.user_id_for_session_id(Some("nope")).await, None);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let (auth, user) = setup().await;
        let first = auth.create_session(user.user_id).await;
        let second = auth.create_session(user.user_id).await;
        assert_ne!(first, second);
        assert!(auth.user_id_for_session_id(Some(&first.to_string())).await.is_some());
    }

    #[tokio::test]
    async fn test_current_user() {
        let (auth, user) = setup().await;
        let session_id = auth.create_session(user.user_id).await;

        let headers = cookie_headers(&session_id.to_string());
        let current = auth.current_user(&headers).await.unwrap();
        assert_eq!(current.map(|u| u.user_id), Some(user.user_id));

        assert!(auth.current_user(&HeaderMap::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_destroy_session() {
        let (auth, user) = setup().await;
        let session_id = auth.create_session(user.user_id).await;
        let headers = cookie_headers(&session_id.to_string());

        assert!(auth.destroy_session(&headers).await);
        assert!(!auth.destroy_session(&headers).await);
        assert!(!auth.destroy_session(&HeaderMap::new()).await);
        assert!(auth.current_user(&headers).await.unwrap().is_none());
    }
}
