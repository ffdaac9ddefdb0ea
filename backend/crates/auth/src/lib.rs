//! User Authentication Service
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, Basic and Session authenticators
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, routers, middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Cookie sessions on the user service
//! - Password reset through a one-time token
//! - A v1 API guarded by Basic Auth or Session Auth, picked by `AUTH_TYPE`
//!
//! ## Security Model
//! - Passwords hashed with Argon2id and an optional pepper
//! - Session ids and reset tokens are random UUIDs
//! - A reset token is cleared once used

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, AuthType};
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryUserRepository;
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{
    api_v1_router, api_v1_router_generic, auth_router, auth_router_generic,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
