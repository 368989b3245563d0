//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Resource endpoints are mounted under `/api`; system endpoints at the
//! root.

pub mod dto;
pub mod handlers;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "room-inventory", description = "Hotel room availability and trip planning"),
    paths(
        handlers::rooms::list_rooms,
        handlers::rooms::room_count,
        handlers::rooms::book_room,
        handlers::rooms::out_room,
        handlers::rooms::set_room_count,
        handlers::trips::plan_trip,
        handlers::system::health_handler,
        handlers::system::inventory_config_handler,
    ),
    tags(
        (name = "Rooms", description = "Room-pool inventory"),
        (name = "Trips", description = "Trip planning relay"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    with_swagger_ui(
        Router::new()
            .nest("/api", handlers::routes())
            .merge(handlers::system::routes()),
    )
}

/// Builds the router with its middleware stack and binds `state`.
///
/// Requests running longer than `request_timeout` are answered with
/// `408 Request Timeout`.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

/// Mounts the Swagger UI at `/swagger-ui`, serving `/api-docs/openapi.json`.
#[cfg(feature = "swagger-ui")]
fn with_swagger_ui(router: Router<AppState>) -> Router<AppState> {
    router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn with_swagger_ui(router: Router<AppState>) -> Router<AppState> {
    router
}
