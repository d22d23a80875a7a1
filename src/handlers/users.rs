//! # Staff Account API Handlers
//!
//! Account CRUD for the admin panel. Password hashes never leave the
//! repository layer; responses carry everything else.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::error::{ApiError, account_error};
use crate::models::staff_user;
use crate::repositories::{NewUser, UserRepository, UserUpdate};
use crate::server::AppState;

/// Staff account representation without the credential
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub login: String,
    pub position: String,
    pub last_success_login: Option<DateTime<FixedOffset>>,
    pub last_failed_login: Option<DateTime<FixedOffset>>,
    pub password_change_date: DateTime<FixedOffset>,
}

impl From<staff_user::Model> for UserResponse {
    fn from(user: staff_user::Model) -> Self {
        Self {
            id: user.id,
            surname: user.surname,
            name: user.name,
            patronymic: user.patronymic,
            login: user.login,
            position: user.position,
            last_success_login: user.last_success_login,
            last_failed_login: user.last_failed_login,
            password_change_date: user.password_change_date,
        }
    }
}

/// Body accepted when creating a staff account
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserBody {
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub login: String,
    pub password: String,
    pub position: String,
}

/// Body accepted when updating a staff account
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserBody {
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub login: String,
    /// When present and non-empty, replaces the password
    pub password: Option<String>,
    pub position: String,
}

/// Lists all staff accounts
#[utoipa::path(
    get,
    path = "/api/root/users",
    responses(
        (status = 200, description = "Staff accounts", body = [UserResponse]),
        (status = 401, description = "Not authenticated", body = ApiError)
    ),
    tag = "users"
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.list_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Creates a staff account
#[utoipa::path(
    post,
    path = "/api/root/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Missing required field or login already taken", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError)
    ),
    tag = "users"
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(body) = payload?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(NewUser {
            surname: body.surname,
            name: body.name,
            patronymic: body.patronymic,
            login: body.login,
            password: body.password,
            position: body.position,
        })
        .await
        .map_err(account_error)?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Updates a staff account, optionally replacing its password
#[utoipa::path(
    put,
    path = "/api/root/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Login already taken", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Unknown user", body = ApiError)
    ),
    tag = "users"
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateUserBody>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(body) = payload?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .update(
            id,
            UserUpdate {
                surname: body.surname,
                name: body.name,
                patronymic: body.patronymic,
                login: body.login,
                password: body.password,
                position: body.position,
            },
        )
        .await
        .map_err(account_error)?;
    Ok(Json(user.into()))
}

/// Deletes a staff account; deleting your own account is rejected
#[utoipa::path(
    delete,
    path = "/api/root/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Attempted self-delete", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Unknown user", body = ApiError)
    ),
    tag = "users"
)]
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let repo = UserRepository::new(state.db.clone());
    repo.delete(id, current.id).await?;
    state.sessions.remove_for_user(id);
    Ok(StatusCode::NO_CONTENT)
}
