//! Application Layer
//!
//! Use cases of the user service, plus the request authentication schemes
//! of the v1 API.

pub mod basic_auth;
pub mod check_session;
pub mod config;
pub mod register_user;
pub mod request_auth;
pub mod reset_password;
pub mod session_auth;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use basic_auth::BasicAuth;
pub use check_session::CheckSessionUseCase;
pub use config::{AuthConfig, AuthType};
pub use register_user::RegisterUserUseCase;
pub use request_auth::{Authenticator, require_auth};
pub use reset_password::ResetPasswordUseCase;
pub use session_auth::SessionAuth;
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
