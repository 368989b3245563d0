//! Room-pool handlers: list, count, book, release, set.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{RoomChangeResponse, RoomCountResponse, SetRoomCountRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ServiceError};
use crate::persistence::RoomPool;

/// `GET /api/rooms`: List every pool row.
///
/// # Errors
///
/// Returns [`ServiceError::Storage`] on backend failure.
#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "Rooms",
    summary = "List room pools",
    description = "Returns every row of the inventory table in id order. Only the first row is used for booking.",
    responses(
        (status = 200, description = "All pool rows", body = Vec<RoomPool>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_rooms(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.inventory.list_all().await?;
    Ok(Json(rows))
}

/// `GET /api/room-count`: Available rooms in the authoritative pool.
///
/// # Errors
///
/// Returns [`ServiceError::PoolNotFound`] if the table is empty.
#[utoipa::path(
    get,
    path = "/api/room-count",
    tag = "Rooms",
    summary = "Available room count",
    responses(
        (status = 200, description = "Current count", body = RoomCountResponse),
        (status = 404, description = "No pool row", body = ErrorResponse),
    )
)]
pub async fn room_count(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let total_rooms = state.inventory.get_count().await?;
    Ok(Json(RoomCountResponse {
        success: true,
        total_rooms,
    }))
}

/// `GET /api/book-room`: Take one room.
///
/// # Errors
///
/// Returns [`ServiceError::PoolNotFound`] if the table is empty and
/// [`ServiceError::RoomsExhausted`] if no room is left.
#[utoipa::path(
    get,
    path = "/api/book-room",
    tag = "Rooms",
    summary = "Book a room",
    description = "Decrements the available count by one.",
    responses(
        (status = 200, description = "Room booked", body = RoomChangeResponse),
        (status = 400, description = "No rooms available", body = ErrorResponse),
        (status = 404, description = "No pool row", body = ErrorResponse),
    )
)]
pub async fn book_room(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let total_rooms = state.inventory.book_room().await?;
    Ok(Json(RoomChangeResponse::new(
        "Room booked successfully",
        total_rooms,
    )))
}

/// `GET /api/out-room`: Return one room.
///
/// # Errors
///
/// Returns [`ServiceError::PoolNotFound`] if the table is empty and
/// [`ServiceError::AtCapacity`] if every room is already available.
#[utoipa::path(
    get,
    path = "/api/out-room",
    tag = "Rooms",
    summary = "Release a room",
    description = "Increments the available count by one, up to the configured capacity.",
    responses(
        (status = 200, description = "Room released", body = RoomChangeResponse),
        (status = 400, description = "Already at capacity", body = ErrorResponse),
        (status = 404, description = "No pool row", body = ErrorResponse),
    )
)]
pub async fn out_room(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let total_rooms = state.inventory.release_room().await?;
    Ok(Json(RoomChangeResponse::new(
        "Room released successfully",
        total_rooms,
    )))
}

/// `PUT /api/rooms/{id}`: Overwrite a pool's count.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] on a malformed body or a count
/// outside `0..=capacity`, and [`ServiceError::RowNotFound`] if the row
/// does not exist.
#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    summary = "Set room count",
    params(
        ("id" = i64, Path, description = "Pool row id"),
    ),
    request_body = SetRoomCountRequest,
    responses(
        (status = 200, description = "Count updated", body = RoomChangeResponse),
        (status = 400, description = "Invalid count", body = ErrorResponse),
        (status = 404, description = "Row not found", body = ErrorResponse),
    )
)]
pub async fn set_room_count(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<SetRoomCountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(req) = payload.map_err(|e| ServiceError::Validation(e.body_text()))?;
    let total_rooms = state.inventory.set_count(id, req.total_rooms).await?;
    Ok(Json(RoomChangeResponse::new("Room count updated", total_rooms)))
}

/// Room-pool routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/rooms/{id}", put(set_room_count))
        .route("/room-count", get(room_count))
        .route("/book-room", get(book_room))
        .route("/out-room", get(out_room))
}
