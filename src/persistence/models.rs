//! Database models for the `hotel_config` table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the `hotel_config` table.
///
/// The lowest-id row is the authoritative pool for booking and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct RoomPool {
    /// Row identifier, immutable once created. Read as `BIGINT` whatever
    /// the column width.
    pub id: i64,
    /// Rooms currently available.
    #[sqlx(rename = "number_of_rooms")]
    pub total_rooms: i32,
}
