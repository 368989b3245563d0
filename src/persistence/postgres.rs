//! PostgreSQL implementation of [`InventoryStore`].

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::InventoryStore;
use super::models::RoomPool;
use crate::config::DatabaseConfig;
use crate::error::ServiceError;

// `id` is widened so tables created with a `SERIAL` (INT4) key decode into
// `RoomPool::id` as well.
const SELECT_ROWS: &str =
    "SELECT id::BIGINT AS id, number_of_rooms FROM hotel_config ORDER BY id ASC";
const SELECT_FIRST: &str =
    "SELECT id::BIGINT AS id, number_of_rooms FROM hotel_config ORDER BY id ASC LIMIT 1";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS hotel_config (\
     id BIGSERIAL PRIMARY KEY, \
     number_of_rooms INTEGER NOT NULL CHECK (number_of_rooms >= 0))";

/// PostgreSQL-backed inventory store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the database is unreachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, ServiceError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout())
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl InventoryStore for PostgresStore {
    async fn ensure_initialized(&self, seed: i32) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;
        // Serializes concurrent first starts so only one of them seeds.
        sqlx::query("LOCK TABLE hotel_config IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let seeded = sqlx::query(
            "INSERT INTO hotel_config (number_of_rooms) \
             SELECT $1 WHERE NOT EXISTS (SELECT 1 FROM hotel_config)",
        )
        .bind(seed)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        if seeded > 0 {
            tracing::info!(total_rooms = seed, "seeded hotel_config");
        }
        Ok(())
    }

    async fn list_rows(&self) -> Result<Vec<RoomPool>, ServiceError> {
        let rows = sqlx::query_as::<_, RoomPool>(SELECT_ROWS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_first(&self) -> Result<Option<RoomPool>, ServiceError> {
        let row = sqlx::query_as::<_, RoomPool>(SELECT_FIRST)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn set_total(&self, id: i64, total_rooms: i32) -> Result<bool, ServiceError> {
        let result = sqlx::query("UPDATE hotel_config SET number_of_rooms = $2 WHERE id = $1")
            .bind(id)
            .bind(total_rooms)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn decrement_if_positive(&self, id: i64) -> Result<Option<i32>, ServiceError> {
        let value = sqlx::query_scalar::<_, i32>(
            "UPDATE hotel_config SET number_of_rooms = number_of_rooms - 1 \
             WHERE id = $1 AND number_of_rooms > 0 RETURNING number_of_rooms",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn increment_if_below(
        &self,
        id: i64,
        capacity: i32,
    ) -> Result<Option<i32>, ServiceError> {
        let value = sqlx::query_scalar::<_, i32>(
            "UPDATE hotel_config SET number_of_rooms = number_of_rooms + 1 \
             WHERE id = $1 AND number_of_rooms < $2 RETURNING number_of_rooms",
        )
        .bind(id)
        .bind(capacity)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }
}
