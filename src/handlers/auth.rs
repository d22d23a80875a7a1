//! # Session API Handlers
//!
//! Login, logout and password change. Wrong login and wrong password
//! deliberately produce the same response so the endpoint cannot be used
//! to probe for account names.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::{
    CurrentUser, SessionUser, clear_session_cookie, session_cookie, session_token,
    verify_password,
};
use crate::error::{ApiError, unauthorized};
use crate::handlers::users::UserResponse;
use crate::repositories::UserRepository;
use crate::server::AppState;

const BAD_CREDENTIALS: &str = "Invalid login or password";

/// Login request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginBody {
    pub login: String,
    pub password: String,
}

/// Password change request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordBody {
    pub current_password: String,
    pub new_password: String,
}

/// Authenticates a staff member and issues a session cookie
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Session established", body = UserResponse),
        (status = 401, description = "Invalid credentials", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;

    let repo = UserRepository::new(state.db.clone());
    let Some(user) = repo.find_by_login(&body.login).await? else {
        tracing::info!(login = %body.login, "Login attempt for unknown account");
        return Err(unauthorized(Some(BAD_CREDENTIALS)));
    };

    if !verify_password(&body.password, &user.password) {
        repo.record_login_failure(user.id).await?;
        tracing::info!(login = %user.login, "Failed login attempt");
        return Err(unauthorized(Some(BAD_CREDENTIALS)));
    }

    repo.record_login_success(user.id).await?;

    let token = state.sessions.create(SessionUser {
        id: user.id,
        login: user.login.clone(),
        name: user.name.clone(),
        surname: user.surname.clone(),
        position: user.position.clone(),
    });
    let cookie = session_cookie(&token, state.config.session_max_age_seconds);

    tracing::info!(login = %user.login, "Staff member logged in");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(user)),
    )
        .into_response())
}

/// Drops the current session and clears the cookie
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 204, description = "Session dropped")
    ),
    tag = "auth"
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token);
    }
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        StatusCode::NO_CONTENT,
    )
        .into_response()
}

/// Changes the authenticated user's password after verifying the current one
#[utoipa::path(
    post,
    path = "/api/change-password",
    request_body = ChangePasswordBody,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Empty new password", body = ApiError),
        (status = 401, description = "Current password mismatch", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    payload: Result<Json<ChangePasswordBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = payload?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(current.id)
        .await?
        .ok_or_else(|| unauthorized(None))?;

    if !verify_password(&body.current_password, &user.password) {
        return Err(unauthorized(Some("Current password is incorrect")));
    }

    repo.set_password(user.id, &body.new_password).await?;
    tracing::info!(login = %user.login, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}
