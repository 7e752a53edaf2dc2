//! # bazaar-store: Persistence & Orchestration for Bazaar POS
//!
//! Snapshot storage and the service layer that drives [`bazaar_core`]
//! operations against it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Operator UI (external)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-store (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ShopService ──► AccountStore (trait)                          │   │
//! │  │                      ├── MemoryAccountStore  (device / tests)   │   │
//! │  │                      └── SqliteAccountStore  (durable)          │   │
//! │  │                                                                 │   │
//! │  │   One snapshot read, one pure core call, one snapshot write    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-core (pure logic)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The `AccountStore` trait and the in-memory backend
//! - [`sqlite`] - Durable SQLite backend (one JSON document per account)
//! - [`service`] - `ShopService`: load → core operation → persist
//! - [`error`] - `StoreError` / `ServiceError`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod service;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ServiceError, ServiceResult, StoreError, StoreResult};
pub use service::{ShopService, StockInRequest, DEFAULT_PUT_TIMEOUT};
pub use sqlite::{SqliteAccountStore, StoreConfig};
pub use store::{AccountStore, MemoryAccountStore};
