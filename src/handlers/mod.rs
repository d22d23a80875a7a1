//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the hotel
//! booking API.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ServiceInfo;
use crate::server::AppState;

pub mod auth;
pub mod availability;
pub mod bookings;
pub mod images;
pub mod pages;
pub mod rooms;
pub mod stats;
pub mod users;

/// Root API handler that returns basic service information
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "service"
)]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness probe verifying database connectivity
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "service"
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<ServiceInfo>, ApiError> {
    crate::db::health_check(&state.db).await?;
    Ok(Json(ServiceInfo::default()))
}

/// Public hotel contact details
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HotelInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Returns the hotel's public contact information
#[utoipa::path(
    get,
    path = "/api/hotel-info",
    responses(
        (status = 200, description = "Hotel contact information", body = HotelInfo)
    ),
    tag = "service"
)]
pub async fn hotel_info(State(state): State<AppState>) -> Json<HotelInfo> {
    Json(HotelInfo {
        name: state.config.hotel_name.clone(),
        address: state.config.hotel_address.clone(),
        phone: state.config.hotel_phone.clone(),
    })
}
