//! # Domain Types
//!
//! Durable domain types for one shop account.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        AccountSnapshot                              │
//! │                                                                     │
//! │  profile: AccountProfile      shop name, contact, currency, PIN     │
//! │  products: Vec<ProductVariant>  one row per color×size SKU          │
//! │  transactions: Vec<Transaction> financial ledger (INCOME/EXPENSE/   │
//! │                                 DUE)                                │
//! │  sales: Vec<SaleRecord>       per-line sale history for reporting   │
//! │  partners: Vec<Partner>       free-form contacts                    │
//! │  moderators: Vec<Moderator>   delegated operators (PIN login)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is scoped to exactly one account. The snapshot is the unit
//! of persistence: core operations compute a full next snapshot in memory
//! and the store replaces it in one write.
//!
//! Field names serialize in camelCase so an exported backup document matches
//! the shape the original device storage used and round-trips exactly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Transaction Type
// =============================================================================

/// The three ledger entry buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money received (sales income, manual income entries).
    Income,
    /// Money spent.
    Expense,
    /// The unpaid remainder of a sale, tracked as its own entry.
    Due,
}

// =============================================================================
// Product Variant
// =============================================================================

/// One purchasable SKU: a single color+size of a named product.
///
/// Variants are created in bulk by the catalog engine's stock-in operation
/// (one record per selected color × selected size) and share `name`,
/// `code`, and `category` across the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Display name, shared across variants of the base product.
    pub name: String,
    /// Product code, shared across variants of the base product.
    pub code: String,
    /// Free-form category used by the sales reports.
    pub category: String,
    /// Variant color.
    pub color: String,
    /// Variant size.
    pub size: String,
    /// Units on hand. Never goes negative: checkout validates first and the
    /// catalog decrement clamps at zero as a fallback.
    pub stock_quantity: i64,
    /// Purchase cost per unit.
    pub buy_price: Money,
    /// Listed selling price per unit. A sale line may negotiate a
    /// different unit price; profit is computed against `buy_price`.
    pub sell_price: Money,
    /// When this variant was stocked in.
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Sale Record
// =============================================================================

/// Durable per-line record of a completed sale, for reporting.
///
/// Created exactly once per cart line at checkout and immutable afterwards,
/// except for manual deletion. Deleting a record does NOT restore stock —
/// documented behavior carried over from the source system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    /// Shared across all lines of the same checkout.
    pub invoice_id: String,
    pub date: NaiveDate,
    pub product_name: String,
    pub category: String,
    pub qty: i64,
    /// Negotiated unit price for this line.
    pub sell_price: Money,
    /// Unit cost at the time of sale.
    pub buy_price: Money,
    /// `(sell_price - buy_price) × qty`.
    pub profit: Money,
}

// =============================================================================
// Transaction
// =============================================================================

/// One financial ledger entry.
///
/// A checkout creates at most two: one INCOME for the paid portion and one
/// DUE for the unpaid remainder. Manual entries carry whatever type the
/// operator chose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Owning account id.
    pub user_id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Always positive; the type carries the direction.
    pub amount: Money,
    pub description: String,
    pub category: String,
    /// Ledger date (ISO date; lexical order equals chronological order).
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Sale profit attributed to this entry. A checkout attaches the whole
    /// cart profit to its INCOME row, or to the DUE row when nothing was
    /// paid — never to both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<Money>,
}

// =============================================================================
// Partner
// =============================================================================

/// Free-form contact record. Independent of the sale flow; carried for
/// completeness of the account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub description: String,
}

// =============================================================================
// Moderator
// =============================================================================

/// A delegated operator on an admin's account.
///
/// Moderators sign in with their `code` (a PIN checked by the external auth
/// layer) and operate against the same account data with reduced rights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moderator {
    pub id: String,
    pub name: String,
    pub email: String,
    pub code: String,
}

// =============================================================================
// Account Profile
// =============================================================================

/// Profile fields of the shop account.
///
/// Password and session handling live in the external auth layer; the
/// snapshot only carries the fields the core and its reports need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    /// Shop / owner name, printed on invoices.
    pub name: String,
    pub email: String,
    pub mobile: String,
    /// Secret PIN for privileged actions (verified by the caller).
    pub secret_code: String,
    /// Display currency symbol. Formatting only — all arithmetic is
    /// currency-agnostic minor units.
    pub currency: String,
}

// =============================================================================
// Account Snapshot
// =============================================================================

/// One shop's complete data: the unit of persistence.
///
/// The account store reads and atomically replaces whole snapshots by id.
/// Checkout and every other mutating operation compute the full next
/// snapshot in memory first, then persist once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub id: String,
    pub profile: AccountProfile,
    #[serde(default)]
    pub products: Vec<ProductVariant>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub moderators: Vec<Moderator>,
}

impl AccountSnapshot {
    /// Creates an empty snapshot for a new account.
    pub fn new(id: impl Into<String>, profile: AccountProfile) -> Self {
        AccountSnapshot {
            id: id.into(),
            profile,
            ..Default::default()
        }
    }

    /// Looks up a moderator by sign-in code.
    pub fn moderator_by_code(&self, code: &str) -> Option<&Moderator> {
        self.moderators.iter().find(|m| m.code == code)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Income).unwrap(),
            "\"INCOME\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::Due).unwrap(),
            "\"DUE\""
        );
    }

    #[test]
    fn test_transaction_serializes_type_field() {
        let tx = Transaction {
            id: "t1".to_string(),
            user_id: "acc-1".to_string(),
            tx_type: TransactionType::Expense,
            amount: Money::from_minor(500),
            description: "Tea".to_string(),
            category: "Misc".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            created_at: Utc::now(),
            profit: None,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "EXPENSE");
        assert_eq!(json["date"], "2026-03-01");
        // Absent profit is omitted, not null
        assert!(json.get("profit").is_none());
    }

    #[test]
    fn test_moderator_by_code() {
        let mut snapshot = AccountSnapshot::new("acc-1", AccountProfile::default());
        snapshot.moderators.push(Moderator {
            id: "m1".to_string(),
            name: "Rahim".to_string(),
            email: "rahim@example.com".to_string(),
            code: "4321".to_string(),
        });

        assert_eq!(snapshot.moderator_by_code("4321").unwrap().name, "Rahim");
        assert!(snapshot.moderator_by_code("0000").is_none());
    }
}
