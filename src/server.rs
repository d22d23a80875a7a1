//! # Server Configuration
//!
//! This module contains the server setup and configuration for the hotel
//! booking API.

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::auth::{self, SessionStore};
use crate::config::AppConfig;
use crate::db::init_pool;
use crate::handlers;
use crate::seeds::seed_if_empty;
use crate::telemetry::{self, TraceContext};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
}

/// Attaches a per-request trace context so error responses and logs can be
/// correlated.
async fn trace_context_middleware(mut request: Request, next: Next) -> Response {
    let context = TraceContext {
        trace_id: format!("req-{}", &Uuid::new_v4().to_string()[..8]),
    };
    request.extensions_mut().insert(context.clone());
    telemetry::with_trace_context(context, next.run(request)).await
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let staff_api = Router::new()
        .route("/api/admin/bookings", get(handlers::bookings::list_pending))
        .route(
            "/api/admin/bookings/{id}/approve",
            post(handlers::bookings::approve),
        )
        .route(
            "/api/admin/bookings/{id}/reject",
            post(handlers::bookings::reject),
        )
        .route("/api/rooms/{id}/images", get(handlers::images::list))
        .route(
            "/api/root/rooms",
            get(handlers::rooms::list).post(handlers::rooms::create),
        )
        .route(
            "/api/root/rooms/{id}",
            get(handlers::rooms::get)
                .put(handlers::rooms::update)
                .delete(handlers::rooms::delete),
        )
        .route("/api/root/rooms/{id}/images", post(handlers::images::add))
        .route(
            "/api/root/rooms/{room_id}/images/{image_id}",
            axum::routing::delete(handlers::images::delete),
        )
        .route(
            "/api/root/rooms/{room_id}/images/{image_id}/set-main",
            post(handlers::images::set_main),
        )
        .route(
            "/api/root/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route(
            "/api/root/users/{id}",
            put(handlers::users::update).delete(handlers::users::delete),
        )
        .route("/api/root/stats", get(handlers::stats::stats))
        .route("/api/change-password", post(handlers::auth::change_password))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_staff_api,
        ));

    let staff_pages = Router::new()
        .route("/admin", get(handlers::pages::admin))
        .route("/root", get(handlers::pages::root))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_staff_page,
        ));

    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/login", get(handlers::pages::login))
        .route("/api", get(handlers::service_info))
        .route("/api/health", get(handlers::health))
        .route("/api/hotel-info", get(handlers::hotel_info))
        .route(
            "/api/rooms/available",
            get(handlers::availability::available_rooms),
        )
        .route("/api/booking-request", post(handlers::bookings::submit))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout))
        .merge(staff_api)
        .merge(staff_pages)
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration: connects the database,
/// runs migrations, seeds initial data and serves until shutdown.
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = init_pool(&config).await?;
    Migrator::up(&db, None).await?;
    seed_if_empty(&db, &config).await?;

    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(config.clone()),
        sessions: SessionStore::new(config.session_max_age_seconds),
    };
    let app = create_app(state);

    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, profile = %config.profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::service_info,
        crate::handlers::health,
        crate::handlers::hotel_info,
        crate::handlers::availability::available_rooms,
        crate::handlers::bookings::submit,
        crate::handlers::bookings::list_pending,
        crate::handlers::bookings::approve,
        crate::handlers::bookings::reject,
        crate::handlers::rooms::list,
        crate::handlers::rooms::get,
        crate::handlers::rooms::create,
        crate::handlers::rooms::update,
        crate::handlers::rooms::delete,
        crate::handlers::images::list,
        crate::handlers::images::add,
        crate::handlers::images::delete,
        crate::handlers::images::set_main,
        crate::handlers::users::list,
        crate::handlers::users::create,
        crate::handlers::users::update,
        crate::handlers::users::delete,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::auth::change_password,
        crate::handlers::stats::stats,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::booking::BookingStatus,
            crate::models::room::RoomStatus,
            crate::handlers::HotelInfo,
            crate::handlers::bookings::BookingRequestBody,
            crate::handlers::bookings::BookingResponse,
            crate::handlers::bookings::RejectBody,
            crate::handlers::rooms::RoomBody,
            crate::handlers::rooms::RoomResponse,
            crate::handlers::rooms::RoomDetailResponse,
            crate::handlers::images::AddImageBody,
            crate::handlers::images::ImageResponse,
            crate::handlers::users::CreateUserBody,
            crate::handlers::users::UpdateUserBody,
            crate::handlers::users::UserResponse,
            crate::handlers::auth::LoginBody,
            crate::handlers::auth::ChangePasswordBody,
            crate::repositories::stats::GroupCount,
            crate::repositories::stats::HotelStats,
            crate::error::ApiError,
        )
    ),
    info(
        title = "Hotelier API",
        description = "Hotel booking administration backend",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
