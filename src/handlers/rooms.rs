//! # Room Inventory API Handlers
//!
//! Staff-side CRUD for the room inventory. The listing is an HTML
//! management-table fragment; everything else speaks JSON.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Json, Response};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::room::{self, RoomStatus};
use crate::render::{RoomCardView, RoomsTableTemplate, render};
use crate::repositories::{RoomInput, RoomRepository, RoomSummary};
use crate::server::AppState;

/// Body accepted by room create and update
#[derive(Debug, Deserialize, ToSchema)]
pub struct RoomBody {
    pub building: String,
    pub room_number: String,
    #[serde(default)]
    pub double_beds: i32,
    #[serde(default)]
    pub single_beds: i32,
    #[serde(default)]
    pub kettle: bool,
    #[serde(default)]
    pub tv: bool,
    #[serde(default)]
    pub balcony: bool,
    #[serde(default)]
    pub air_conditioning: bool,
    #[serde(default = "default_rooms_count")]
    pub rooms_count: i32,
    #[serde(default = "default_status")]
    pub status: RoomStatus,
    pub description: Option<String>,
    pub price_per_night: f64,
    /// Initial main image URL; the placeholder is used when omitted.
    /// Only honored on creation.
    pub image_url: Option<String>,
}

fn default_rooms_count() -> i32 {
    1
}

fn default_status() -> RoomStatus {
    RoomStatus::Standard
}

impl From<RoomBody> for RoomInput {
    fn from(body: RoomBody) -> Self {
        RoomInput {
            building: body.building,
            room_number: body.room_number,
            double_beds: body.double_beds,
            single_beds: body.single_beds,
            kettle: body.kettle,
            tv: body.tv,
            balcony: body.balcony,
            air_conditioning: body.air_conditioning,
            rooms_count: body.rooms_count,
            status: body.status,
            description: body.description,
            price_per_night: body.price_per_night,
        }
    }
}

/// Room representation returned by the JSON endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub id: i32,
    pub building: String,
    pub room_number: String,
    pub double_beds: i32,
    pub single_beds: i32,
    pub kettle: bool,
    pub tv: bool,
    pub balcony: bool,
    pub air_conditioning: bool,
    pub rooms_count: i32,
    pub status: RoomStatus,
    pub description: Option<String>,
    pub price_per_night: f64,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<room::Model> for RoomResponse {
    fn from(room: room::Model) -> Self {
        Self {
            id: room.id,
            building: room.building,
            room_number: room.room_number,
            double_beds: room.double_beds,
            single_beds: room.single_beds,
            kettle: room.kettle,
            tv: room.tv,
            balcony: room.balcony,
            air_conditioning: room.air_conditioning,
            rooms_count: room.rooms_count,
            status: room.status,
            description: room.description,
            price_per_night: room.price_per_night,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

/// Room with its media enrichment
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDetailResponse {
    #[serde(flatten)]
    pub room: RoomResponse,
    pub main_image: String,
    pub images_count: usize,
}

impl From<RoomSummary> for RoomDetailResponse {
    fn from(summary: RoomSummary) -> Self {
        Self {
            room: summary.room.into(),
            main_image: summary.main_image,
            images_count: summary.images_count,
        }
    }
}

/// Lists all rooms as an HTML management-table fragment
#[utoipa::path(
    get,
    path = "/api/root/rooms",
    responses(
        (status = 200, description = "HTML fragment with the rooms table", content_type = "text/html"),
        (status = 401, description = "Not authenticated", body = ApiError)
    ),
    tag = "rooms"
)]
pub async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let repo = RoomRepository::new(state.db.clone());
    let rooms = repo.list_all(&state.config.placeholder_image).await?;

    Ok(render(RoomsTableTemplate {
        rooms: rooms.into_iter().map(RoomCardView::from).collect(),
    }))
}

/// Returns a single room with its main image and image count
#[utoipa::path(
    get,
    path = "/api/root/rooms/{id}",
    params(("id" = i32, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room detail", body = RoomDetailResponse),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    tag = "rooms"
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RoomDetailResponse>, ApiError> {
    let repo = RoomRepository::new(state.db.clone());
    let summary = repo
        .get_with_media(id, &state.config.placeholder_image)
        .await?;
    Ok(Json(summary.into()))
}

/// Creates a room with exactly one main image attached
#[utoipa::path(
    post,
    path = "/api/root/rooms",
    request_body = RoomBody,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 400, description = "Missing or invalid field", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError)
    ),
    tag = "rooms"
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<RoomBody>, JsonRejection>,
) -> Result<(StatusCode, Json<RoomResponse>), ApiError> {
    let Json(body) = payload?;

    let repo = RoomRepository::new(state.db.clone());
    let image_url = body.image_url.clone();
    let room = repo
        .create(body.into(), image_url, &state.config.placeholder_image)
        .await?;
    Ok((StatusCode::CREATED, Json(room.into())))
}

/// Replaces a room's mutable attributes
#[utoipa::path(
    put,
    path = "/api/root/rooms/{id}",
    params(("id" = i32, Path, description = "Room id")),
    request_body = RoomBody,
    responses(
        (status = 200, description = "Room updated", body = RoomResponse),
        (status = 400, description = "Missing or invalid field", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    tag = "rooms"
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<RoomBody>, JsonRejection>,
) -> Result<Json<RoomResponse>, ApiError> {
    let Json(body) = payload?;

    let repo = RoomRepository::new(state.db.clone());
    let room = repo.update(id, body.into()).await?;
    Ok(Json(room.into()))
}

/// Deletes a room and, via the FK cascade, all of its images
#[utoipa::path(
    delete,
    path = "/api/root/rooms/{id}",
    params(("id" = i32, Path, description = "Room id")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    tag = "rooms"
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let repo = RoomRepository::new(state.db.clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
