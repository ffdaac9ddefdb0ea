//! Auth Routers

use axum::{
    Router,
    middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::config::{AuthConfig, AuthType};
use crate::application::{BasicAuth, SessionAuth};
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{ApiAuth, require_api_auth};
use crate::presentation::v1_handlers::{self, ApiV1State};

/// Create the user service router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create the user service router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::index))
        .route("/users", post(handlers::register_user::<R>))
        .route(
            "/sessions",
            post(handlers::login::<R>).delete(handlers::logout::<R>),
        )
        .route("/profile", get(handlers::profile::<R>))
        .route(
            "/reset_password",
            post(handlers::get_reset_password_token::<R>).put(handlers::update_password::<R>),
        )
        .with_state(state)
}

/// Create the v1 API router with PostgreSQL repository
///
/// Meant to be nested under `/api/v1`.
pub fn api_v1_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    api_v1_router_generic(repo, config)
}

/// Create the v1 API router for any repository implementation
pub fn api_v1_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    let auth = match config.auth_type {
        AuthType::None => ApiAuth::None,
        AuthType::Basic => ApiAuth::Basic(BasicAuth::new(repo.clone(), config.clone())),
        AuthType::Session => ApiAuth::Session(SessionAuth::new(repo.clone(), config.clone())),
    };
    tracing::info!(auth_type = ?config.auth_type, "v1 API authentication");

    let state = ApiV1State { repo, config, auth };

    Router::new()
        .route("/status", get(v1_handlers::status))
        .route("/unauthorized", get(v1_handlers::unauthorized))
        .route("/forbidden", get(v1_handlers::forbidden))
        .route("/users/me", get(v1_handlers::users_me))
        .route(
            "/auth_session/login",
            post(v1_handlers::session_login::<R>),
        )
        .route(
            "/auth_session/logout",
            delete(v1_handlers::session_logout::<R>),
        )
        .fallback(v1_handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_auth::<R>,
        ))
        .with_state(state)
}
