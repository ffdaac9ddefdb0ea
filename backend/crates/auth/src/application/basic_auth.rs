//! Basic Authentication
//!
//! `Authorization: Basic <base64(email:password)>` resolved against the user
//! store on every request.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::application::config::AuthConfig;
use crate::application::request_auth::{Authenticator, authorization_header};
use crate::application::sign_in::SignInUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

const BASIC_PREFIX: &str = "Basic ";

/// Base64 part of a Basic `Authorization` header
pub fn extract_base64_authorization_header(header: &str) -> Option<&str> {
    header.strip_prefix(BASIC_PREFIX)
}

/// Decode the Base64 part, which must hold UTF-8
pub fn decode_base64_authorization_header(base64: &str) -> Option<String> {
    platform::crypto::from_base64_utf8(base64)
}

/// Split decoded credentials into email and password
///
/// Only the first `:` separates; passwords may contain colons.
pub fn extract_user_credentials(decoded: &str) -> Option<(String, String)> {
    decoded
        .split_once(':')
        .map(|(email, password)| (email.to_string(), password.to_string()))
}

/// Basic authentication against a user repository
pub struct BasicAuth<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> Clone for BasicAuth<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> BasicAuth<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// User registered as `email` whose password is `password`
    pub async fn user_object_from_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<Option<User>> {
        SignInUseCase::new(self.repo.clone(), self.config.clone())
            .authenticate(email, password)
            .await
    }
}

impl<R> Authenticator for BasicAuth<R>
where
    R: UserRepository + Send + Sync,
{
    async fn current_user(&self, headers: &HeaderMap) -> AuthResult<Option<User>> {
        let credentials = authorization_header(headers)
            .and_then(extract_base64_authorization_header)
            .and_then(decode_base64_authorization_header)
            .and_then(|decoded| extract_user_credentials(&decoded));

        match credentials {
            Some((email, password)) => self.user_object_from_credentials(&email, &password).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register_user::RegisterUserUseCase;
    use crate::infra::memory::InMemoryUserRepository;
    use axum::http::{HeaderValue, header};

    #[test]
    fn test_extract_base64_authorization_header() {
        assert_eq!(
            extract_base64_authorization_header("Basic SG9sYmVydG9u"),
            Some("SG9sYmVydG9u")
        );
        assert_eq!(extract_base64_authorization_header("Holberton"), None);
        assert_eq!(extract_base64_authorization_header("Basic"), None);
        assert_eq!(extract_base64_authorization_header("Bearer abc"), None);
    }

    #[test]
    fn test_decode_base64_authorization_header() {
        assert_eq!(
            decode_base64_authorization_header("SG9sYmVydG9u").as_deref(),
            Some("Holberton")
        );
        assert_eq!(decode_base64_authorization_header("Holberton"), None);
    }

    #[test]
    fn test_extract_user_credentials() {
        assert_eq!(
            extract_user_credentials("bob@dylan.com:toto1234"),
            Some(("bob@dylan.com".to_string(), "toto1234".to_string()))
        );
        assert_eq!(
            extract_user_credentials("bob@dylan.com:to:to"),
            Some(("bob@dylan.com".to_string(), "to:to".to_string()))
        );
        assert_eq!(extract_user_credentials("Holberton School"), None);
    }

    #[tokio::test]
    async fn test_current_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::default());
        RegisterUserUseCase::new(repo.clone(), config.clone())
            .execute("bob@example.com", "H0lberton")
            .await
            .unwrap();
        let auth = BasicAuth::new(repo, config);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic Ym9iQGV4YW1wbGUuY29tOkgwbGJlcnRvbg=="),
        );
        let user = auth.current_user(&headers).await.unwrap();
        assert_eq!(user.map(|u| u.email.to_string()), Some("bob@example.com".to_string()));

        // base64("bob@example.com:wrong")
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic Ym9iQGV4YW1wbGUuY29tOndyb25n"),
        );
        assert!(auth.current_user(&headers).await.unwrap().is_none());

        assert!(auth.current_user(&HeaderMap::new()).await.unwrap().is_none());
    }
}
