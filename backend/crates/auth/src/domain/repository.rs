//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::user::{User, UserChanges, UserLookup};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::UserPassword,
};
use crate::error::AuthResult;

/// User credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user and return it
    ///
    /// An existing email is `AuthError::EmailTaken`.
    async fn add_user(&self, email: Email, hashed_password: UserPassword) -> AuthResult<User>;

    /// First user matching `lookup`, if any
    async fn find_user_by(&self, lookup: UserLookup) -> AuthResult<Option<User>>;

    /// Apply `changes` to a user and return the updated row
    ///
    /// An unknown id is `AuthError::UserNotFound`.
    async fn update_user(&self, user_id: &UserId, changes: UserChanges) -> AuthResult<User>;
}
