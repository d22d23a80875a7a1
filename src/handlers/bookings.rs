//! # Booking API Handlers
//!
//! Public booking submission and the staff-side lifecycle endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Json, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::booking::BookingStatus;
use crate::render::{BookingCardView, PendingBookingsTemplate, render};
use crate::repositories::{BookingRepository, BookingRequestInput};
use crate::server::AppState;

/// Public booking submission body
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingRequestBody {
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    /// First night of the stay (ISO date, inclusive)
    pub checkin: NaiveDate,
    /// Departure date (ISO date, exclusive)
    pub checkout: NaiveDate,
    pub room_id: i32,
}

/// Booking state returned by the lifecycle endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i32,
    pub status: BookingStatus,
    pub rejection_reason: Option<String>,
}

/// Body accepted by the reject endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectBody {
    /// Free-text reason shown to staff later
    pub reason: Option<String>,
}

/// Submits a public booking request; it starts out pending
#[utoipa::path(
    post,
    path = "/api/booking-request",
    request_body = BookingRequestBody,
    responses(
        (status = 201, description = "Booking request created", body = BookingResponse),
        (status = 400, description = "Missing required field", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequestBody>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let Json(body) = payload?;

    let repo = BookingRepository::new(state.db.clone());
    let booking = repo
        .submit(BookingRequestInput {
            client_surname: body.surname,
            client_name: body.name,
            client_patronymic: body.patronymic,
            client_phone: body.phone,
            client_email: body.email,
            checkin_date: body.checkin,
            checkout_date: body.checkout,
            room_id: body.room_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            id: booking.id,
            status: booking.status,
            rejection_reason: None,
        }),
    ))
}

/// Lists pending booking requests as an HTML fragment, newest first
#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    responses(
        (status = 200, description = "HTML fragment with pending booking cards", content_type = "text/html"),
        (status = 401, description = "Not authenticated", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn list_pending(State(state): State<AppState>) -> Result<Response, ApiError> {
    let repo = BookingRepository::new(state.db.clone());
    let bookings = repo.list_pending().await?;

    Ok(render(PendingBookingsTemplate {
        bookings: bookings
            .into_iter()
            .map(|(booking, room)| BookingCardView::from_booking(booking, room))
            .collect(),
    }))
}

/// Approves a pending booking, expanding it into per-night occupancy rows
#[utoipa::path(
    post,
    path = "/api/admin/bookings/{id}/approve",
    params(("id" = i32, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking approved", body = BookingResponse),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Unknown booking", body = ApiError),
        (status = 409, description = "Booking already resolved", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BookingResponse>, ApiError> {
    let repo = BookingRepository::new(state.db.clone());
    let booking = repo.approve(id).await?;
    Ok(Json(BookingResponse {
        id: booking.id,
        status: booking.status,
        rejection_reason: booking.rejection_reason,
    }))
}

/// Rejects a pending booking, storing the supplied reason
#[utoipa::path(
    post,
    path = "/api/admin/bookings/{id}/reject",
    params(("id" = i32, Path, description = "Booking id")),
    request_body = RejectBody,
    responses(
        (status = 200, description = "Booking rejected", body = BookingResponse),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "Unknown booking", body = ApiError),
        (status = 409, description = "Booking already resolved", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<RejectBody>, JsonRejection>,
) -> Result<Json<BookingResponse>, ApiError> {
    let Json(body) = payload?;

    let repo = BookingRepository::new(state.db.clone());
    let booking = repo.reject(id, body.reason).await?;
    Ok(Json(BookingResponse {
        id: booking.id,
        status: booking.status,
        rejection_reason: booking.rejection_reason,
    }))
}
