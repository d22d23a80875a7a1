//! Page shell handlers
//!
//! Serve the minimal HTML shells; all dynamic content arrives via the
//! fragment endpoints.

use axum::extract::State;
use axum::response::Response;

use crate::render::{AdminTemplate, IndexTemplate, LoginTemplate, RootTemplate, render};
use crate::server::AppState;

/// Public landing page with the availability search form
pub async fn index(State(state): State<AppState>) -> Response {
    render(IndexTemplate {
        hotel_name: state.config.hotel_name.clone(),
        hotel_address: state.config.hotel_address.clone(),
        hotel_phone: state.config.hotel_phone.clone(),
    })
}

/// Login page
pub async fn login(State(state): State<AppState>) -> Response {
    render(LoginTemplate {
        hotel_name: state.config.hotel_name.clone(),
    })
}

/// Booking administration page (session gated)
pub async fn admin(State(state): State<AppState>) -> Response {
    render(AdminTemplate {
        hotel_name: state.config.hotel_name.clone(),
    })
}

/// Inventory and accounts page (session gated)
pub async fn root(State(state): State<AppState>) -> Response {
    render(RootTemplate {
        hotel_name: state.config.hotel_name.clone(),
    })
}
