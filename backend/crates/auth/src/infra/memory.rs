//! In-Memory Repository Implementation
//!
//! Process-local user store used when no database is configured, and by
//! the tests. Clones share the same underlying map.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::{User, UserChanges, UserLookup};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn matches(user: &User, lookup: &UserLookup) -> bool {
    match lookup {
        UserLookup::Id(id) => &user.user_id == id,
        UserLookup::Email(email) => &user.email == email,
        UserLookup::SessionId(id) => user.session_id.as_ref() == Some(id),
        UserLookup::ResetToken(token) => user.reset_token.as_ref() == Some(token),
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn add_user(&self, email: Email, hashed_password: UserPassword) -> AuthResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken(email.to_string()));
        }

        let user = User::new(email, hashed_password);
        users.insert(user.user_id, user.clone());
        Ok(user)
    }

    async fn find_user_by(&self, lookup: UserLookup) -> AuthResult<Option<User>> {
        let users = self.users.read().await;

        let found = match &lookup {
            UserLookup::Id(id) => users.get(id),
            _ => users.values().find(|u| matches(u, &lookup)),
        };

        Ok(found.cloned())
    }

    async fn update_user(&self, user_id: &UserId, changes: UserChanges) -> AuthResult<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        user.apply(changes);
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{token::SessionId, user_password::RawPassword};

    fn hashed(password: &str) -> UserPassword {
        let raw = RawPassword::new(password.to_string()).unwrap();
        UserPassword::from_raw(&raw, None).unwrap()
    }

    #[tokio::test]
    async fn test_add_user_returns_new_user() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .add_user(Email::new("test@test.com").unwrap(), hashed("SuperHashedPwd"))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "test@test.com");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_add_user_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        let email = Email::new("test@test.com").unwrap();
        repo.add_user(email.clone(), hashed("a")).await.unwrap();

        let err = repo.add_user(email, hashed("b")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_user_by() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .add_user(Email::new("test@test.com").unwrap(), hashed("pwd"))
            .await
            .unwrap();

        let by_email = repo
            .find_user_by(UserLookup::Email(Email::new("test@test.com").unwrap()))
            .await
            .unwrap();
        assert_eq!(by_email.map(|u| u.user_id), Some(user.user_id));

        let by_id = repo.find_user_by(UserLookup::Id(user.user_id)).await.unwrap();
        assert!(by_id.is_some());

        let missing = repo
            .find_user_by(UserLookup::Email(Email::new("other@test.com").unwrap()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_user() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .add_user(Email::new("test@test.com").unwrap(), hashed("pwd"))
            .await
            .unwrap();
        let session_id = SessionId::new();

        let updated = repo
            .update_user(&user.user_id, UserChanges::session(Some(session_id)))
            .await
            .unwrap();
        assert_eq!(updated.session_id, Some(session_id));

        let found = repo
            .find_user_by(UserLookup::SessionId(session_id))
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.user_id), Some(user.user_id));
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let repo = InMemoryUserRepository::new();
        let err = repo
            .update_user(&UserId::new(), UserChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryUserRepository::new();
        let clone = repo.clone();
        repo.add_user(Email::new("test@test.com").unwrap(), hashed("pwd"))
            .await
            .unwrap();
        assert!(!clone.is_empty().await);
    }
}
