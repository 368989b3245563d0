//! System endpoints: health check, inventory configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Liveness report.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    checked_at: DateTime<Utc>,
}

/// `GET /health`: liveness probe.
///
/// Does not touch the store, so it stays green while the database is down.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    responses(
        (status = 200, description = "Process is serving requests", body = HealthResponse),
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        checked_at: Utc::now(),
    })
}

/// Inventory bounds in effect.
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryConfigResponse {
    capacity: i32,
}

/// `GET /config/inventory`: Configured room capacity.
#[utoipa::path(
    get,
    path = "/config/inventory",
    tag = "System",
    summary = "Inventory configuration",
    description = "Returns the upper bound the room count may not exceed.",
    responses(
        (status = 200, description = "Inventory bounds", body = InventoryConfigResponse),
    )
)]
pub async fn inventory_config_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(InventoryConfigResponse {
            capacity: state.inventory.capacity(),
        }),
    )
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/inventory", get(inventory_config_handler))
}
