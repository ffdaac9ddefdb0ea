//! Presentation Layer
//!
//! HTTP handlers, DTOs, routers, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod v1_handlers;

pub use handlers::AuthAppState;
pub use middleware::{ApiAuth, CurrentUser, require_api_auth};
pub use router::{api_v1_router, api_v1_router_generic, auth_router, auth_router_generic};
pub use v1_handlers::ApiV1State;
