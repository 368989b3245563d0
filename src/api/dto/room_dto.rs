//! Room-pool DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for `GET /api/room-count`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomCountResponse {
    /// Always `true`.
    pub success: bool,
    /// Rooms currently available.
    pub total_rooms: i32,
}

/// Response body for every endpoint that changes the count.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomChangeResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Count after the change.
    pub total_rooms: i32,
}

impl RoomChangeResponse {
    /// Builds a successful change response.
    #[must_use]
    pub fn new(message: &str, total_rooms: i32) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            total_rooms,
        }
    }
}

/// Request body for `PUT /api/rooms/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRoomCountRequest {
    /// New count, within `0..=capacity`.
    pub total_rooms: i32,
}
