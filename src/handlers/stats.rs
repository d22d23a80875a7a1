//! # Statistics API Handlers

use axum::extract::{Query, State};
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::repositories::{HotelStats, StatsRepository};
use crate::server::AppState;

/// Query parameters for the stats endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// Date to compute the booked/free split for (ISO date, default today)
    pub date: Option<NaiveDate>,
}

/// Returns dashboard statistics
#[utoipa::path(
    get,
    path = "/api/root/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Dashboard statistics", body = HotelStats),
        (status = 401, description = "Not authenticated", body = ApiError)
    ),
    tag = "stats"
)]
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<HotelStats>, ApiError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let repo = StatsRepository::new(state.db.clone());
    let stats = repo.gather(date).await?;
    Ok(Json(stats))
}
