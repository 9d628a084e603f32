//! `SQLite` implementation of the `KeyValueStore` trait.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use evidence_core::error::DomainError;
use evidence_core::store::KeyValueStore;

use crate::schema::CREATE_KV_TABLE;

/// SQLite-backed key/value store. Values are stored as JSON text.
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Creates a store over an existing pool. Call [`Self::migrate`] before use.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url` and ensures the
    /// schema exists.
    ///
    /// A single connection is used: the quiz has one user, and in-memory
    /// databases are per-connection.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the URL is invalid or the database cannot be
    /// opened or migrated.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self::new(pool);
        store.migrate().await?;
        info!(url, "key/value store ready");
        Ok(store)
    }

    /// Creates the key/value table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the statement fails.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_KV_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn infrastructure(e: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("key/value store error: {e}"))
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let row = sqlx::query("SELECT value FROM evidence_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let text: String = row.try_get("value").map_err(|e| infrastructure(&e))?;
        serde_json::from_str(&text).map(Some).map_err(|e| {
            DomainError::Infrastructure(format!("stored value for {key} is not valid JSON: {e}"))
        })
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO evidence_kv (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE
            SET value = excluded.value, updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM evidence_kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(())
    }
}
