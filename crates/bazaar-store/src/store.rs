//! # Account Store
//!
//! The persistence seam: whole-snapshot get and atomic replace-by-id.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AccountStore                                     │
//! │                                                                         │
//! │  get(id)            → the last successfully put snapshot, or          │
//! │                       AccountNotFound                                  │
//! │  put(snapshot)      → atomically replaces the stored snapshot for     │
//! │                       snapshot.id (insert on first put)               │
//! │                                                                         │
//! │  Atomicity is per whole snapshot: a reader never observes a partial   │
//! │  write. Concurrent puts on one account are last-write-wins.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`MemoryAccountStore`] is both the "local device storage" backend and
//! the test double; [`crate::sqlite::SqliteAccountStore`] is the durable one.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use bazaar_core::AccountSnapshot;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store Trait
// =============================================================================

/// Durable per-account snapshot storage.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Loads the snapshot for the given account id.
    async fn get(&self, account_id: &str) -> StoreResult<AccountSnapshot>;

    /// Atomically replaces the stored snapshot for `snapshot.id`,
    /// inserting on first write.
    async fn put(&self, snapshot: &AccountSnapshot) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Process-local store backed by a map. Cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, AccountSnapshot>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        MemoryAccountStore::default()
    }

    /// Seeds a snapshot synchronously, for test setup.
    pub fn with_snapshot(snapshot: AccountSnapshot) -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(snapshot.id.clone(), snapshot);
        MemoryAccountStore {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn get(&self, account_id: &str) -> StoreResult<AccountSnapshot> {
        let accounts = self.accounts.read().await;
        accounts
            .get(account_id)
            .cloned()
            .ok_or_else(|| StoreError::AccountNotFound {
                id: account_id.to_string(),
            })
    }

    async fn put(&self, snapshot: &AccountSnapshot) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        debug!(account_id = %snapshot.id, "Replacing in-memory snapshot");
        accounts.insert(snapshot.id.clone(), snapshot.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::AccountProfile;

    #[tokio::test]
    async fn test_get_missing_account() {
        let store = MemoryAccountStore::new();
        let err = store.get("ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::AccountNotFound { .. }));
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let store = MemoryAccountStore::new();
        let snapshot = AccountSnapshot::new("acc-1", AccountProfile::default());

        store.put(&snapshot).await.unwrap();
        let loaded = store.get("acc-1").await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_put_replaces_whole_snapshot() {
        let store = MemoryAccountStore::new();
        let mut snapshot = AccountSnapshot::new("acc-1", AccountProfile::default());
        store.put(&snapshot).await.unwrap();

        snapshot.profile.name = "Renamed Shop".to_string();
        store.put(&snapshot).await.unwrap();

        let loaded = store.get("acc-1").await.unwrap();
        assert_eq!(loaded.profile.name, "Renamed Shop");
    }
}
