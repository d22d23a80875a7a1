//! # Room Media API Handlers
//!
//! Staff-side management of room image sets. The single-main invariant is
//! enforced by the repository inside transactions.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::room_image;
use crate::repositories::RoomImageRepository;
use crate::server::AppState;

/// Body accepted when adding an image
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddImageBody {
    pub image_url: String,
    /// Make this the room's main image, demoting any previous one
    #[serde(default)]
    pub is_main: bool,
}

/// Image representation returned by the JSON endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    pub id: i32,
    pub room_id: i32,
    pub image_url: String,
    pub is_main: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl From<room_image::Model> for ImageResponse {
    fn from(image: room_image::Model) -> Self {
        Self {
            id: image.id,
            room_id: image.room_id,
            image_url: image.image_url,
            is_main: image.is_main,
            created_at: image.created_at,
        }
    }
}

/// Lists a room's images, main image first
#[utoipa::path(
    get,
    path = "/api/rooms/{id}/images",
    params(("id" = i32, Path, description = "Room id")),
    responses(
        (status = 200, description = "Images of the room", body = [ImageResponse]),
        (status = 401, description = "Not authenticated", body = ApiError)
    ),
    tag = "images"
)]
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ImageResponse>>, ApiError> {
    let repo = RoomImageRepository::new(state.db.clone());
    let images = repo.list_for_room(id).await?;
    Ok(Json(images.into_iter().map(ImageResponse::from).collect()))
}

/// Adds an image to a room
#[utoipa::path(
    post,
    path = "/api/root/rooms/{id}/images",
    params(("id" = i32, Path, description = "Room id")),
    request_body = AddImageBody,
    responses(
        (status = 201, description = "Image added", body = ImageResponse),
        (status = 400, description = "Missing image URL", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    tag = "images"
)]
pub async fn add(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<AddImageBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ImageResponse>), ApiError> {
    let Json(body) = payload?;

    let repo = RoomImageRepository::new(state.db.clone());
    let image = repo.add(id, body.image_url, body.is_main).await?;
    Ok((StatusCode::CREATED, Json(image.into())))
}

/// Deletes an image; a deleted main image is replaced by a remaining one
#[utoipa::path(
    delete,
    path = "/api/root/rooms/{room_id}/images/{image_id}",
    params(
        ("room_id" = i32, Path, description = "Room id"),
        ("image_id" = i32, Path, description = "Image id")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Image does not belong to the room", body = ApiError)
    ),
    tag = "images"
)]
pub async fn delete(
    State(state): State<AppState>,
    Path((room_id, image_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let repo = RoomImageRepository::new(state.db.clone());
    repo.delete(room_id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Makes an image the room's main image
#[utoipa::path(
    post,
    path = "/api/root/rooms/{room_id}/images/{image_id}/set-main",
    params(
        ("room_id" = i32, Path, description = "Room id"),
        ("image_id" = i32, Path, description = "Image id")
    ),
    responses(
        (status = 204, description = "Main image set"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Image does not belong to the room", body = ApiError)
    ),
    tag = "images"
)]
pub async fn set_main(
    State(state): State<AppState>,
    Path((room_id, image_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let repo = RoomImageRepository::new(state.db.clone());
    repo.set_main(room_id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
