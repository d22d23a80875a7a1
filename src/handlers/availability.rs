//! # Availability API Handlers
//!
//! Public endpoint answering "which rooms are free between these dates"
//! with a rendered HTML fragment.

use axum::extract::{Query, State};
use axum::response::Response;
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ApiError, validation_error};
use crate::render::{AvailableRoomsTemplate, RoomCardView, render};
use crate::repositories::AvailabilityRepository;
use crate::server::AppState;

/// Query parameters for the availability search
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// First night of the stay (ISO date, inclusive)
    pub checkin: Option<NaiveDate>,
    /// Departure date (ISO date, exclusive)
    pub checkout: Option<NaiveDate>,
}

/// Lists rooms free over the half-open interval [checkin, checkout)
#[utoipa::path(
    get,
    path = "/api/rooms/available",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "HTML fragment with available room cards", content_type = "text/html"),
        (status = 400, description = "Missing checkin or checkout", body = ApiError)
    ),
    tag = "availability"
)]
pub async fn available_rooms(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Response, ApiError> {
    let (Some(checkin), Some(checkout)) = (query.checkin, query.checkout) else {
        let mut missing = serde_json::Map::new();
        if query.checkin.is_none() {
            missing.insert("checkin".to_string(), "Required parameter is missing".into());
        }
        if query.checkout.is_none() {
            missing.insert("checkout".to_string(), "Required parameter is missing".into());
        }
        return Err(validation_error(
            "Both checkin and checkout are required",
            serde_json::Value::Object(missing),
        ));
    };

    let repo = AvailabilityRepository::new(state.db.clone());
    let rooms = repo
        .available_rooms(checkin, checkout, &state.config.placeholder_image)
        .await?;

    tracing::debug!(%checkin, %checkout, count = rooms.len(), "Availability query");

    Ok(render(AvailableRoomsTemplate {
        rooms: rooms.into_iter().map(RoomCardView::from).collect(),
    }))
}
