//! Inventory service: bound-checked booking and release on the room pool.

use std::sync::Arc;

use crate::config::InventoryPolicy;
use crate::error::ServiceError;
use crate::persistence::{InventoryStore, RoomPool};

/// Business rules for the room pool.
///
/// The store only persists; every bound is decided here. Mutations go
/// through the store's conditional updates, so two concurrent bookings
/// can never both take the last room.
#[derive(Debug, Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    policy: InventoryPolicy,
}

impl InventoryService {
    /// Creates a new `InventoryService`.
    #[must_use]
    pub fn new(store: Arc<dyn InventoryStore>, policy: InventoryPolicy) -> Self {
        Self { store, policy }
    }

    /// Returns the configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> i32 {
        self.policy.capacity
    }

    /// Creates and seeds the pool table if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on backend failure.
    pub async fn initialize(&self) -> Result<(), ServiceError> {
        self.store.ensure_initialized(self.policy.seed).await
    }

    /// Returns every pool row.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on backend failure.
    pub async fn list_all(&self) -> Result<Vec<RoomPool>, ServiceError> {
        self.store.list_rows().await
    }

    /// Returns the available-room count of the authoritative pool.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PoolNotFound`] if the table is empty.
    pub async fn get_count(&self) -> Result<i32, ServiceError> {
        Ok(self.first_pool().await?.total_rooms)
    }

    /// Takes one room. Returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PoolNotFound`] if the table is empty and
    /// [`ServiceError::RoomsExhausted`] if no room is left.
    pub async fn book_room(&self) -> Result<i32, ServiceError> {
        let pool = self.first_pool().await?;
        let total_rooms = self
            .store
            .decrement_if_positive(pool.id)
            .await?
            .ok_or(ServiceError::RoomsExhausted)?;

        tracing::info!(pool_id = pool.id, total_rooms, "room booked");
        Ok(total_rooms)
    }

    /// Returns one room to the pool. Returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PoolNotFound`] if the table is empty and
    /// [`ServiceError::AtCapacity`] if the pool is already full.
    pub async fn release_room(&self) -> Result<i32, ServiceError> {
        let pool = self.first_pool().await?;
        let capacity = self.policy.capacity;
        let total_rooms = self
            .store
            .increment_if_below(pool.id, capacity)
            .await?
            .ok_or(ServiceError::AtCapacity { capacity })?;

        tracing::info!(pool_id = pool.id, total_rooms, "room released");
        Ok(total_rooms)
    }

    /// Overwrites the count of row `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if `total_rooms` is outside
    /// `0..=capacity` and [`ServiceError::RowNotFound`] if the row does
    /// not exist.
    pub async fn set_count(&self, id: i64, total_rooms: i32) -> Result<i32, ServiceError> {
        let capacity = self.policy.capacity;
        if !(0..=capacity).contains(&total_rooms) {
            return Err(ServiceError::Validation(format!(
                "total_rooms must be within 0..={capacity}, got {total_rooms}"
            )));
        }
        if !self.store.set_total(id, total_rooms).await? {
            return Err(ServiceError::RowNotFound(id));
        }

        tracing::info!(pool_id = id, total_rooms, "room count set");
        Ok(total_rooms)
    }

    async fn first_pool(&self) -> Result<RoomPool, ServiceError> {
        self.store
            .get_first()
            .await?
            .ok_or(ServiceError::PoolNotFound)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use tokio_test::{assert_err, assert_ok};

    fn make_service() -> (Arc<MemoryStore>, InventoryService) {
        let store = Arc::new(MemoryStore::new());
        let service = InventoryService::new(
            Arc::clone(&store) as Arc<dyn InventoryStore>,
            InventoryPolicy::default(),
        );
        (store, service)
    }

    async fn initialized_service() -> InventoryService {
        let (_, service) = make_service();
        assert_ok!(service.initialize().await);
        service
    }

    #[tokio::test]
    async fn empty_table_is_not_found() {
        let (_, service) = make_service();
        let err = assert_err!(service.get_count().await);
        assert!(matches!(err, ServiceError::PoolNotFound));
        assert!(matches!(
            service.book_room().await,
            Err(ServiceError::PoolNotFound)
        ));
        assert!(matches!(
            service.release_room().await,
            Err(ServiceError::PoolNotFound)
        ));
    }

    #[tokio::test]
    async fn initialize_seeds_four_rooms() {
        let service = initialized_service().await;
        assert_eq!(assert_ok!(service.get_count().await), 4);
    }

    #[tokio::test]
    async fn initialize_twice_keeps_one_row() {
        let service = initialized_service().await;
        let _ = assert_ok!(service.book_room().await);
        assert_ok!(service.initialize().await);

        let rows = assert_ok!(service.list_all().await);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().map(|r| r.total_rooms), Some(3));
    }

    #[tokio::test]
    async fn booking_then_release_walks_the_bounds() {
        let service = initialized_service().await;

        let mut booked = Vec::new();
        for _ in 0..4 {
            booked.push(assert_ok!(service.book_room().await));
        }
        assert_eq!(booked, vec![3, 2, 1, 0]);

        let err = assert_err!(service.book_room().await);
        assert!(matches!(err, ServiceError::RoomsExhausted));
        assert_eq!(assert_ok!(service.get_count().await), 0);

        let mut released = Vec::new();
        for _ in 0..5 {
            released.push(assert_ok!(service.release_room().await));
        }
        assert_eq!(released, vec![1, 2, 3, 4, 5]);

        let err = assert_err!(service.release_room().await);
        assert!(matches!(err, ServiceError::AtCapacity { capacity: 5 }));
        assert_eq!(assert_ok!(service.get_count().await), 5);
    }

    #[tokio::test]
    async fn only_first_row_is_mutated() {
        let (store, service) = make_service();
        let first = store.insert_row(2).await;
        let second = store.insert_row(5).await;

        assert_eq!(assert_ok!(service.book_room().await), 1);

        let rows = assert_ok!(service.list_all().await);
        assert_eq!(
            rows,
            vec![
                RoomPool { id: first, total_rooms: 1 },
                RoomPool { id: second, total_rooms: 5 },
            ]
        );
    }

    #[tokio::test]
    async fn concurrent_bookings_never_oversell() {
        let service = Arc::new(initialized_service().await);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move { service.book_room().await }));
        }

        let mut successes = 0;
        for handle in handles {
            let Ok(result) = handle.await else {
                panic!("booking task panicked");
            };
            if result.is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 4);
        assert_eq!(assert_ok!(service.get_count().await), 0);
    }

    #[tokio::test]
    async fn concurrent_releases_never_overfill() {
        let service = Arc::new(initialized_service().await);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move { service.release_room().await }));
        }

        let mut successes = 0;
        let mut at_capacity = 0;
        for handle in handles {
            match handle.await {
                Ok(Ok(_)) => successes += 1,
                Ok(Err(ServiceError::AtCapacity { .. })) => at_capacity += 1,
                Ok(Err(e)) => panic!("unexpected error: {e}"),
                Err(_) => panic!("release task panicked"),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(at_capacity, 15);
        assert_eq!(assert_ok!(service.get_count().await), 5);
    }

    #[tokio::test]
    async fn set_count_validates_range_and_row() {
        let service = initialized_service().await;

        assert_eq!(assert_ok!(service.set_count(1, 5).await), 5);
        assert!(matches!(
            service.set_count(1, 6).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.set_count(1, -1).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.set_count(42, 1).await,
            Err(ServiceError::RowNotFound(42))
        ));
        assert_eq!(assert_ok!(service.get_count().await), 5);
    }
}
