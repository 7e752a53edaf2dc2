//! # SQLite Account Store
//!
//! Durable [`AccountStore`] backed by a single-table SQLite database.
//!
//! ## Schema
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  accounts                                                               │
//! │  ┌──────────────┬──────────┬────────────────────────────────────────┐  │
//! │  │ id           │ TEXT PK  │ account id                             │  │
//! │  │ snapshot     │ TEXT     │ whole AccountSnapshot as JSON          │  │
//! │  │ updated_at   │ TEXT     │ RFC 3339, set on every put             │  │
//! │  └──────────────┴──────────┴────────────────────────────────────────┘  │
//! │                                                                         │
//! │  put = INSERT .. ON CONFLICT(id) DO UPDATE: one statement, so a        │
//! │  reader sees either the old document or the new one, never a mix.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One row per account keeps the replace-by-id contract trivially atomic
//! and the exported backup identical to what is stored.
//!
//! ## WAL Mode
//! WAL (Write-Ahead Logging) is enabled so readers don't block the writer
//! and the database recovers cleanly from a crash mid-put.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use bazaar_core::AccountSnapshot;

use crate::error::{StoreError, StoreResult};
use crate::store::AccountStore;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/bazaar.db").max_connections(5);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a single-shop deployment)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration for the given database path. The file is
    /// created on connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// In-memory database configuration, for tests.
    ///
    /// Single connection: each in-memory connection is its own database.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }
}

// =============================================================================
// SQLite Store
// =============================================================================

/// Durable snapshot store over a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    /// Opens (or creates) the database and ensures the schema exists.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening account store"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let store = SqliteAccountStore { pool };
        store.ensure_schema().await?;

        info!(
            max_connections = config.max_connections,
            "Account store ready"
        );
        Ok(store)
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id          TEXT PRIMARY KEY,
                snapshot    TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Returns a reference to the connection pool, for maintenance queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the connection pool. Call on application shutdown.
    pub async fn close(&self) {
        info!("Closing account store pool");
        self.pool.close().await;
    }

    /// Checks that the database answers queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn get(&self, account_id: &str) -> StoreResult<AccountSnapshot> {
        let row = sqlx::query("SELECT snapshot FROM accounts WHERE id = ?1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::AccountNotFound {
                id: account_id.to_string(),
            })?;

        let document: String = row.try_get("snapshot")?;
        let snapshot = serde_json::from_str(&document)?;
        debug!(account_id, "Loaded snapshot");
        Ok(snapshot)
    }

    async fn put(&self, snapshot: &AccountSnapshot) -> StoreResult<()> {
        let document = serde_json::to_string(snapshot)?;

        sqlx::query(
            r#"
            INSERT INTO accounts (id, snapshot, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                snapshot = excluded.snapshot,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&snapshot.id)
        .bind(&document)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(
            account_id = %snapshot.id,
            bytes = document.len(),
            "Persisted snapshot"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{AccountProfile, Money, ProductVariant};

    #[tokio::test]
    async fn test_in_memory_store_health() {
        let store = SqliteAccountStore::connect(StoreConfig::in_memory())
            .await
            .unwrap();
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = StoreConfig::new("/tmp/bazaar-test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let store = SqliteAccountStore::connect(StoreConfig::in_memory())
            .await
            .unwrap();

        let mut snapshot = AccountSnapshot::new("acc-1", AccountProfile::default());
        snapshot.products.push(ProductVariant {
            id: "var-1".to_string(),
            name: "Polo Shirt".to_string(),
            code: "PS-01".to_string(),
            category: "Shirts".to_string(),
            color: "Red".to_string(),
            size: "L".to_string(),
            stock_quantity: 4,
            buy_price: Money::from_minor(6000),
            sell_price: Money::from_minor(11000),
            added_at: Utc::now(),
        });

        store.put(&snapshot).await.unwrap();
        let loaded = store.get("acc-1").await.unwrap();
        assert_eq!(loaded, snapshot);

        // Second put replaces, not duplicates
        snapshot.profile.name = "Renamed".to_string();
        store.put(&snapshot).await.unwrap();
        assert_eq!(store.get("acc-1").await.unwrap().profile.name, "Renamed");
    }

    #[tokio::test]
    async fn test_get_missing_account() {
        let store = SqliteAccountStore::connect(StoreConfig::in_memory())
            .await
            .unwrap();
        let err = store.get("ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::AccountNotFound { .. }));
    }
}
