//! # bazaar-core: Pure Business Logic for Bazaar POS
//!
//! This crate is the **heart** of Bazaar POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Operator UI (external)                       │   │
//! │  │    Stock-in ──► Cart ──► Checkout ──► Invoice ──► Reports      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              bazaar-store (ShopService + AccountStore)          │   │
//! │  │    load snapshot ──► core operation ──► persist snapshot       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐ │   │
//! │  │   │  money   │ │ catalog  │ │   sale   │ │ ledger / report  │ │   │
//! │  │   │  Money   │ │ variants │ │ checkout │ │  CRUD / folds    │ │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductVariant, Transaction, SaleRecord, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`actor`] - Operator context and role gates
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`catalog`] - Variant generation, search, resolution, stock
//! - [`sale`] - Cart drafting and checkout
//! - [`ledger`] - Transaction CRUD with permission gates
//! - [`report`] - Daily / type / category aggregations
//! - [`backup`] - JSON export and import of whole snapshots
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in minor units (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Snapshot In, Snapshot Out**: mutations compute the full next account
//!    state in memory; the store layer persists it in one write
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::money::Money;
//!
//! // Create money from minor units (never from floats!)
//! let price = Money::from_minor(1099); // 10.99
//!
//! // Operator input is parsed strictly
//! assert_eq!(Money::parse("10.99").unwrap(), price);
//! assert!(Money::parse("abc").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod actor;
pub mod backup;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bazaar_core::Money` instead of
// `use bazaar_core::money::Money`

pub use actor::{Actor, Role};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use sale::{Checkout, Invoice, SaleDraft, SaleLine, SaleTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single sale.
///
/// Prevents runaway carts; a counter sale in the target shops never comes
/// close to this.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum quantity on a single sale line or stock-in batch.
///
/// Catches fat-finger quantities (1000 typed instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Default number of typeahead suggestions returned by catalog search.
///
/// Presentation bound only; [`catalog::search_variants`] takes an explicit
/// limit and callers may pass a larger one.
pub const SUGGESTION_LIMIT: usize = 5;
