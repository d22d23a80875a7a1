//! End-to-end admin flow against the seeded application: sign in with the
//! default account, review the pending queue, approve a request and watch
//! the dashboard numbers move.

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Days, Utc};
use hotelier::auth::SessionStore;
use hotelier::config::AppConfig;
use hotelier::repositories::BookingRepository;
use hotelier::seeds::seed_if_empty;
use hotelier::server::{AppState, create_app};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::setup_test_db;

async fn seeded_app() -> Result<(AppState, Router)> {
    let db = setup_test_db().await?;
    let config = AppConfig::default();
    seed_if_empty(&db, &config).await?;

    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(config),
        sessions: SessionStore::new(3600),
    };
    let app = create_app(state.clone());
    Ok((state, app))
}

async fn login(app: &Router) -> Result<String> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"login": "admin", "password": "admin123"}).to_string(),
        ))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()?;
    let cookie = set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string();
    assert!(cookie.starts_with("hotel_session="));
    Ok(cookie)
}

async fn body_text(response: axum::response::Response) -> Result<String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[tokio::test]
async fn admin_reviews_and_approves_seeded_bookings() -> Result<()> {
    let (state, app) = seeded_app().await?;
    let cookie = login(&app).await?;

    // The pending queue is gated
    let anonymous = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/bookings")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let queue = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/bookings")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(queue.status(), StatusCode::OK);
    let html = body_text(queue).await?;
    assert!(html.contains("Ivanova"));
    assert!(html.contains("Smirnov"));

    let bookings = BookingRepository::new(state.db.clone());
    let pending = bookings.list_pending().await?;
    assert_eq!(pending.len(), 2);
    let (first, _) = &pending[pending.len() - 1];

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/admin/bookings/{}/approve", first.id))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(bookings.list_pending().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn dashboard_counts_reflect_an_approved_stay() -> Result<()> {
    let (state, app) = seeded_app().await?;
    let cookie = login(&app).await?;

    let bookings = BookingRepository::new(state.db.clone());
    let pending = bookings.list_pending().await?;
    let (booking, _) = &pending[0];
    bookings.approve(booking.id).await?;

    let night = booking.checkin_date;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/root/stats?date={}", night))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let stats: Value = serde_json::from_slice(&bytes)?;

    assert_eq!(stats["users_count"], 1);
    assert_eq!(stats["booked_rooms"], 1);
    assert_eq!(stats["free_rooms"], 3);
    assert_eq!(stats["date"], night.to_string());
    Ok(())
}

#[tokio::test]
async fn public_search_excludes_the_approved_stay() -> Result<()> {
    let (state, app) = seeded_app().await?;

    let bookings = BookingRepository::new(state.db.clone());
    let pending = bookings.list_pending().await?;
    let (booking, _) = &pending[0];
    let approved = bookings.approve(booking.id).await?;

    let uri = format!(
        "/api/rooms/available?checkin={}&checkout={}",
        approved.checkin_date, approved.checkout_date
    );
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(!html.contains(&format!("data-room-id=\"{}\"", approved.room_id)));

    // A search well past the stay still offers every room
    let later_checkin = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(60))
        .expect("date in range");
    let later_checkout = later_checkin
        .checked_add_days(Days::new(2))
        .expect("date in range");
    let uri = format!(
        "/api/rooms/available?checkin={}&checkout={}",
        later_checkin, later_checkout
    );
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let html = body_text(response).await?;
    assert!(html.contains(&format!("data-room-id=\"{}\"", approved.room_id)));
    Ok(())
}
