//! # Store Error Types
//!
//! Error types for snapshot persistence and service orchestration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / serde_json::Error                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds context and categorization            │
//! │       │                          CoreError (bazaar-core)               │
//! │       │                               │                                 │
//! │       └──────────────┬────────────────┘                                │
//! │                      ▼                                                  │
//! │  ServiceError ← what ShopService callers see                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use bazaar_core::CoreError;

// =============================================================================
// Store Error
// =============================================================================

/// Snapshot persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No snapshot stored under the given account id.
    #[error("Account not found: {id}")]
    AccountNotFound { id: String },

    /// The stored document could not be encoded or decoded.
    ///
    /// On read this means a corrupt or incompatible row; the store never
    /// silently discards it.
    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),

    /// Opening the database or acquiring a connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A persistence call exceeded its deadline.
    ///
    /// The write may or may not have landed; the caller's in-memory state
    /// is untouched and the operation can be retried against a fresh read.
    #[error("Store operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::ConnectionFailed(err.to_string())
            }
            other => StoreError::QueryFailed(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Service Error
// =============================================================================

/// Everything a [`crate::service::ShopService`] call can fail with:
/// a business rule violation or a persistence failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<bazaar_core::ValidationError> for ServiceError {
    fn from(err: bazaar_core::ValidationError) -> Self {
        ServiceError::Core(err.into())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_maps_to_query_failed() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::QueryFailed(_)));
    }

    #[test]
    fn test_core_error_passes_through_service_error() {
        let core = CoreError::NotFound {
            entity: "Transaction".to_string(),
            id: "t1".to_string(),
        };
        let service: ServiceError = core.into();
        assert_eq!(service.to_string(), "Transaction not found: t1");
    }

    #[test]
    fn test_timeout_message() {
        let err = StoreError::Timeout(std::time::Duration::from_secs(5));
        assert!(err.to_string().contains("timed out"));
    }
}
