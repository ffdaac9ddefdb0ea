//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - the unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - typed UUID identifiers ([`id::Id`])
//!
//! Keep this crate small. Anything domain specific belongs in the crate
//! that owns the domain.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
