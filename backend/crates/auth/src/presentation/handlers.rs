//! HTTP Handlers of the user service

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, RegisterUserUseCase, ResetPasswordUseCase, SignInUseCase,
    SignOutUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CredentialsForm, EmailMessageResponse, MessageResponse, ProfileResponse, ResetPasswordForm,
    ResetTokenResponse, UpdatePasswordForm, field,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Form body, or an empty form when the body is absent or not form-encoded
pub(crate) fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    form.map(|Form(value)| value).unwrap_or_default()
}

// ============================================================================
// Index
// ============================================================================

/// GET /
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Bienvenue".to_string(),
    })
}

// ============================================================================
// Register
// ============================================================================

/// POST /users
pub async fn register_user<R>(
    State(state): State<AuthAppState<R>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let form = form_or_default(form);
    let email = field(&form.email).ok_or(AuthError::MissingField("email"))?;
    let password = field(&form.password).ok_or(AuthError::MissingField("password"))?;

    let use_case = RegisterUserUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.execute(email, password).await {
        Ok(_) => Ok(Json(EmailMessageResponse {
            email: email.to_string(),
            message: "user created".to_string(),
        })
        .into_response()),
        Err(AuthError::EmailTaken(_)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse {
                message: "email already registered".to_string(),
            }),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// POST /sessions
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let form = form_or_default(form);
    let email = form.email.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    if !use_case.valid_login(&email, &password).await? {
        return Err(AuthError::InvalidCredentials);
    }

    let session_id = use_case
        .create_session(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let cookie = state.config.session_cookie().build_set_cookie(&session_id.to_string());

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(EmailMessageResponse {
            email,
            message: "logged in".to_string(),
        }),
    )
        .into_response())
}

/// DELETE /sessions
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = session_user(&state, &headers).await?;

    SignOutUseCase::new(state.repo.clone())
        .destroy_session(&user.user_id)
        .await?;

    let cookie = state.config.session_cookie().build_delete_cookie();

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /profile
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = session_user(&state, &headers).await?;

    Ok(Json(ProfileResponse {
        email: user.email.to_string(),
    }))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /reset_password
pub async fn get_reset_password_token<R>(
    State(state): State<AuthAppState<R>>,
    form: Result<Form<ResetPasswordForm>, FormRejection>,
) -> AuthResult<Json<ResetTokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let form = form_or_default(form);
    let email = field(&form.email).ok_or(AuthError::ResetNotAllowed)?;

    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.config.clone());

    let reset_token = use_case
        .get_reset_password_token(email)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => AuthError::ResetNotAllowed,
            other => other,
        })?;

    Ok(Json(ResetTokenResponse {
        email: email.to_string(),
        reset_token: reset_token.to_string(),
    }))
}

/// PUT /reset_password
pub async fn update_password<R>(
    State(state): State<AuthAppState<R>>,
    form: Result<Form<UpdatePasswordForm>, FormRejection>,
) -> AuthResult<Json<EmailMessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let form = form_or_default(form);
    let email = field(&form.email).ok_or(AuthError::MissingField("email"))?;
    let reset_token = field(&form.reset_token).ok_or(AuthError::MissingField("reset_token"))?;
    let new_password =
        field(&form.new_password).ok_or(AuthError::MissingField("new_password"))?;

    ResetPasswordUseCase::new(state.repo.clone(), state.config.clone())
        .update_password(reset_token, new_password)
        .await?;

    Ok(Json(EmailMessageResponse {
        email: email.to_string(),
        message: "Password updated".to_string(),
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// User owning the request's session cookie, or `SessionInvalid`
async fn session_user<R>(state: &AuthAppState<R>, headers: &HeaderMap) -> AuthResult<User>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let session_id = extract_cookie(headers, &state.config.session_cookie_name);

    CheckSessionUseCase::new(state.repo.clone())
        .get_user_from_session_id(session_id.as_deref())
        .await?
        .ok_or(AuthError::SessionInvalid)
}
