//! Auth Middleware
//!
//! Guard in front of every v1 API route, resolving the current user with
//! the authenticator selected by `AUTH_TYPE`.

use axum::body::Body;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::request_auth::{
    Authenticator, authorization_header, require_auth, session_cookie,
};
use crate::application::{BasicAuth, SessionAuth};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::v1_handlers::{ApiV1State, json_error};

/// Authenticator of the v1 API
pub enum ApiAuth<R>
where
    R: UserRepository,
{
    /// Authentication disabled
    None,
    Basic(BasicAuth<R>),
    Session(SessionAuth<R>),
}

impl<R> Clone for ApiAuth<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        match self {
            ApiAuth::None => ApiAuth::None,
            ApiAuth::Basic(auth) => ApiAuth::Basic(auth.clone()),
            ApiAuth::Session(auth) => ApiAuth::Session(auth.clone()),
        }
    }
}

impl<R> Authenticator for ApiAuth<R>
where
    R: UserRepository + Send + Sync,
{
    async fn current_user(&self, headers: &HeaderMap) -> AuthResult<Option<User>> {
        match self {
            ApiAuth::None => Ok(None),
            ApiAuth::Basic(auth) => auth.current_user(headers).await,
            ApiAuth::Session(auth) => auth.current_user(headers).await,
        }
    }
}

/// Authenticated user, stored in request extensions by [`require_api_auth`]
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Middleware that authenticates v1 requests
///
/// - no authenticator, or an excluded path: pass through
/// - neither an Authorization header nor a session cookie: 401
/// - credentials that resolve to no user: 403
pub async fn require_api_auth<R>(
    State(state): State<ApiV1State<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    if matches!(state.auth, ApiAuth::None) {
        return next.run(req).await;
    }

    // Nested routers see a stripped path; exclusions use the full one
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    if !require_auth(Some(&path), &state.config.excluded_paths) {
        return next.run(req).await;
    }

    let headers = req.headers().clone();

    if authorization_header(&headers).is_none()
        && session_cookie(&headers, &state.config.api_session_cookie_name).is_none()
    {
        tracing::debug!(path = %path, "No credentials on protected route");
        return json_error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let user = match state.auth.current_user(&headers).await {
        Ok(Some(user)) => user,
        Ok(None) => return json_error(StatusCode::FORBIDDEN, "Forbidden"),
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(CurrentUser(user));

    next.run(req).await
}
