//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{COUNTER_ID, GuestbookStore};
use crate::config::GuestbookConfig;
use crate::domain::{Entry, NewEntry};
use crate::error::GuestbookError;

/// Key for the advisory lock that serializes schema creation across
/// instances sharing one database.
const SCHEMA_LOCK_KEY: i64 = 0x6775_6573_7462_6b01;

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Tables created by earlier deployments may use `INTEGER`/`SERIAL` for
/// `visitors.count` and `entries.id`; queries cast those columns to
/// `BIGINT` so decoding never fails after a write has committed.
///
/// Each method checks a connection out of the pool for exactly one
/// operation; sqlx returns it on drop, including on error paths.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`GuestbookError::StorageUnavailable`] if the database
    /// cannot be reached.
    pub async fn connect(config: &GuestbookConfig) -> Result<Self, GuestbookError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.database_idle_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(GuestbookError::storage)?;

        Ok(Self::new(pool))
    }
}

#[async_trait::async_trait]
impl GuestbookStore for PostgresStore {
    async fn ensure_schema(&self) -> Result<(), GuestbookError> {
        let mut tx = self.pool.begin().await.map_err(GuestbookError::storage)?;

        // Concurrent CREATE TABLE IF NOT EXISTS can still collide on the
        // catalog, so instances take turns.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(GuestbookError::storage)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS visitors (\
                id INTEGER PRIMARY KEY DEFAULT 1, \
                count BIGINT NOT NULL DEFAULT 0 CHECK (count >= 0)\
             )",
        )
        .execute(&mut *tx)
        .await
        .map_err(GuestbookError::storage)?;

        sqlx::query("INSERT INTO visitors (id, count) VALUES ($1, 0) ON CONFLICT (id) DO NOTHING")
            .bind(COUNTER_ID)
            .execute(&mut *tx)
            .await
            .map_err(GuestbookError::storage)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS entries (\
                id BIGSERIAL PRIMARY KEY, \
                name VARCHAR(100) NOT NULL, \
                message VARCHAR(500) NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()\
             )",
        )
        .execute(&mut *tx)
        .await
        .map_err(GuestbookError::storage)?;

        tx.commit().await.map_err(GuestbookError::storage)?;

        tracing::info!("guestbook schema ready");
        Ok(())
    }

    async fn increment_visitors(&self) -> Result<u64, GuestbookError> {
        let count = sqlx::query_scalar::<_, i64>(
            "UPDATE visitors SET count = count + 1 WHERE id = $1 RETURNING count::BIGINT",
        )
        .bind(COUNTER_ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(GuestbookError::storage)?
        .ok_or_else(|| GuestbookError::StorageUnavailable("visitor counter row missing".into()))?;

        u64::try_from(count).map_err(GuestbookError::storage)
    }

    async fn insert_entry(&self, entry: &NewEntry) -> Result<i64, GuestbookError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO entries (name, message) VALUES ($1, $2) RETURNING id::BIGINT",
        )
        .bind(entry.name())
        .bind(entry.message())
        .fetch_one(&self.pool)
        .await
        .map_err(GuestbookError::storage)?;

        Ok(id)
    }

    async fn recent_entries(&self, limit: u32) -> Result<Vec<Entry>, GuestbookError> {
        let rows = sqlx::query_as::<_, (i64, String, String, DateTime<Utc>)>(
            "SELECT id::BIGINT, name, message, created_at FROM entries \
             ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(GuestbookError::storage)?;

        Ok(rows
            .into_iter()
            .map(|(id, name, message, created_at)| Entry {
                id,
                name,
                message,
                created_at,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), GuestbookError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(GuestbookError::storage)?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
