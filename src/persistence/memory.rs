//! Process-local implementation of [`InventoryStore`].
//!
//! Rows live in a `BTreeMap` keyed by id behind a single
//! [`tokio::sync::RwLock`]. Each conditional update holds the write lock
//! for its whole read-check-write, which gives it the same atomicity as
//! the single-statement `UPDATE … WHERE` used by the PostgreSQL store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InventoryStore;
use super::models::RoomPool;
use crate::error::ServiceError;

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, i32>,
}

/// In-memory inventory store. State is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row regardless of existing contents and returns its id.
    pub async fn insert_row(&self, total_rooms: i32) -> i64 {
        let mut table = self.table.write().await;
        table.next_id = table.next_id.saturating_add(1);
        let id = table.next_id;
        table.rows.insert(id, total_rooms);
        id
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn ensure_initialized(&self, seed: i32) -> Result<(), ServiceError> {
        let mut table = self.table.write().await;
        if table.rows.is_empty() {
            table.next_id = table.next_id.saturating_add(1);
            let id = table.next_id;
            table.rows.insert(id, seed);
            tracing::info!(pool_id = id, total_rooms = seed, "seeded in-memory pool");
        }
        Ok(())
    }

    async fn list_rows(&self) -> Result<Vec<RoomPool>, ServiceError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(&id, &total_rooms)| RoomPool { id, total_rooms })
            .collect())
    }

    async fn get_first(&self) -> Result<Option<RoomPool>, ServiceError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .first_key_value()
            .map(|(&id, &total_rooms)| RoomPool { id, total_rooms }))
    }

    async fn set_total(&self, id: i64, total_rooms: i32) -> Result<bool, ServiceError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(value) => {
                *value = total_rooms;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn decrement_if_positive(&self, id: i64) -> Result<Option<i32>, ServiceError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).and_then(|value| {
            (*value > 0).then(|| {
                *value -= 1;
                *value
            })
        }))
    }

    async fn increment_if_below(
        &self,
        id: i64,
        capacity: i32,
    ) -> Result<Option<i32>, ServiceError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).and_then(|value| {
            (*value < capacity).then(|| {
                *value += 1;
                *value
            })
        }))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn ensure_initialized_seeds_once() {
        let store = MemoryStore::new();
        assert_ok!(store.ensure_initialized(4).await);
        assert_ok!(store.ensure_initialized(9).await);

        let rows = assert_ok!(store.list_rows().await);
        assert_eq!(rows, vec![RoomPool { id: 1, total_rooms: 4 }]);
    }

    #[tokio::test]
    async fn ensure_initialized_leaves_existing_rows() {
        let store = MemoryStore::new();
        let id = store.insert_row(2).await;
        assert_ok!(store.ensure_initialized(4).await);

        let first = assert_ok!(store.get_first().await);
        assert_eq!(first, Some(RoomPool { id, total_rooms: 2 }));
    }

    #[tokio::test]
    async fn get_first_on_empty_is_none() {
        let store = MemoryStore::new();
        assert_eq!(assert_ok!(store.get_first().await), None);
    }

    #[tokio::test]
    async fn list_rows_in_id_order() {
        let store = MemoryStore::new();
        let a = store.insert_row(1).await;
        let b = store.insert_row(3).await;

        let rows = assert_ok!(store.list_rows().await);
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn set_total_reports_missing_row() {
        let store = MemoryStore::new();
        let id = store.insert_row(1).await;

        assert!(assert_ok!(store.set_total(id, 3).await));
        assert!(!assert_ok!(store.set_total(id + 10, 3).await));
        assert_eq!(
            assert_ok!(store.get_first().await).map(|r| r.total_rooms),
            Some(3)
        );
    }

    #[tokio::test]
    async fn conditional_updates_stop_at_bounds() {
        let store = MemoryStore::new();
        let id = store.insert_row(1).await;

        assert_eq!(assert_ok!(store.decrement_if_positive(id).await), Some(0));
        assert_eq!(assert_ok!(store.decrement_if_positive(id).await), None);

        assert_eq!(assert_ok!(store.increment_if_below(id, 1).await), Some(1));
        assert_eq!(assert_ok!(store.increment_if_below(id, 1).await), None);
    }
}
