//! Persistence layer: the room-pool counter table.
//!
//! [`InventoryStore`] is the seam between the service layer and storage.
//! Implementations stay dumb about bounds except for the two conditional
//! updates, which must be atomic per call: a concurrent caller can never
//! observe or act on a value another caller is halfway through changing.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use models::RoomPool;
pub use postgres::PostgresStore;

use crate::error::ServiceError;

/// Durable storage for room-pool rows.
#[async_trait]
pub trait InventoryStore: Send + Sync + std::fmt::Debug {
    /// Creates the backing table if absent and inserts one row holding
    /// `seed` when the table is empty. Safe to call on every start.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on backend failure.
    async fn ensure_initialized(&self, seed: i32) -> Result<(), ServiceError>;

    /// Returns every row in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on backend failure.
    async fn list_rows(&self) -> Result<Vec<RoomPool>, ServiceError>;

    /// Returns the lowest-id row, or `None` if the table is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on backend failure.
    async fn get_first(&self) -> Result<Option<RoomPool>, ServiceError>;

    /// Overwrites the counter of row `id`. Returns `false` if the row
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on backend failure.
    async fn set_total(&self, id: i64, total_rooms: i32) -> Result<bool, ServiceError>;

    /// Atomically decrements row `id` if its counter is positive and
    /// returns the new value. `None` means no row was changed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on backend failure.
    async fn decrement_if_positive(&self, id: i64) -> Result<Option<i32>, ServiceError>;

    /// Atomically increments row `id` if its counter is below `capacity`
    /// and returns the new value. `None` means no row was changed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on backend failure.
    async fn increment_if_below(
        &self,
        id: i64,
        capacity: i32,
    ) -> Result<Option<i32>, ServiceError>;
}
