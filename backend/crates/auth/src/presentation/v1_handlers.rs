//! HTTP Handlers of the v1 API
//!
//! Errors here use the `{"error": "..."}` body of the v1 API rather than
//! the problem documents of `AuthError`.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::UserLookup;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::presentation::dto::{CredentialsForm, ErrorResponse, StatusResponse, UserResponse, field};
use crate::presentation::handlers::form_or_default;
use crate::presentation::middleware::{ApiAuth, CurrentUser};

/// Shared state for v1 handlers and the v1 auth guard
#[derive(Clone)]
pub struct ApiV1State<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub auth: ApiAuth<R>,
}

/// v1 error response
pub fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// GET /api/v1/status
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK".to_string(),
    })
}

/// GET /api/v1/unauthorized
pub async fn unauthorized() -> Response {
    json_error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

/// GET /api/v1/forbidden
pub async fn forbidden() -> Response {
    json_error(StatusCode::FORBIDDEN, "Forbidden")
}

/// Unknown v1 route
pub async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "Not found")
}

/// GET /api/v1/users/me
///
/// 404 when the request went through no authenticator.
pub async fn users_me(req: Request) -> Response {
    match req.extensions().get::<CurrentUser>() {
        Some(CurrentUser(user)) => Json(UserResponse::from(user)).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// POST /api/v1/auth_session/login
pub async fn session_login<R>(
    State(state): State<ApiV1State<R>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let ApiAuth::Session(session_auth) = &state.auth else {
        return json_error(StatusCode::NOT_FOUND, "Not found");
    };

    let form = form_or_default(form);
    let Some(email) = field(&form.email) else {
        return json_error(StatusCode::BAD_REQUEST, "email missing");
    };
    let Some(password) = field(&form.password) else {
        return json_error(StatusCode::BAD_REQUEST, "password missing");
    };

    let user = match Email::new(email) {
        Ok(email) => state.repo.find_user_by(UserLookup::Email(email)).await,
        Err(_) => Ok(None),
    };
    let user = match user {
        Ok(Some(user)) => user,
        Ok(None) => return json_error(StatusCode::NOT_FOUND, "no user found for this email"),
        Err(e) => return e.into_response(),
    };

    let password_ok = RawPassword::new(password.to_string())
        .map(|raw| user.hashed_password.verify(&raw, state.config.pepper()))
        .unwrap_or(false);
    if !password_ok {
        return json_error(StatusCode::UNAUTHORIZED, "wrong password");
    }

    let session_id = session_auth.create_session(user.user_id).await;
    let cookie = state
        .config
        .api_session_cookie()
        .build_set_cookie(&session_id.to_string());

    (
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&user)),
    )
        .into_response()
}

/// DELETE /api/v1/auth_session/logout
pub async fn session_logout<R>(State(state): State<ApiV1State<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let destroyed = match &state.auth {
        ApiAuth::Session(session_auth) => session_auth.destroy_session(&headers).await,
        _ => false,
    };

    if !destroyed {
        return json_error(StatusCode::NOT_FOUND, "Not found");
    }

    let cookie = state.config.api_session_cookie().build_delete_cookie();
    ([(header::SET_COOKIE, cookie)], Json(json!({}))).into_response()
}
