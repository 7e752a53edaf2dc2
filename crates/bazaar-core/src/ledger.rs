//! # Ledger
//!
//! CRUD over the snapshot's transaction list, with role gates on the
//! destructive operations.
//!
//! ## Permission Matrix
//! ```text
//! ┌───────────────────────────┬────────┬───────────┐
//! │ Operation                 │ Admin  │ Moderator │
//! ├───────────────────────────┼────────┼───────────┤
//! │ append / update entry     │   ✓    │     ✓     │
//! │ delete entry              │   ✓    │     ✗     │
//! │ reset (wipe all entries)  │   ✓    │     ✗     │
//! └───────────────────────────┴────────┴───────────┘
//! ```
//!
//! All functions mutate the in-memory snapshot only; the caller persists
//! the result.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::actor::Actor;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AccountSnapshot, Transaction, TransactionType};
use crate::validation;

// =============================================================================
// Entry Draft & Patch
// =============================================================================

/// Operator input for a manual ledger entry.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub tx_type: TransactionType,
    pub amount: Money,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

/// Partial update to an existing entry. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub tx_type: Option<TransactionType>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

// =============================================================================
// Mutations
// =============================================================================

/// Appends a manual entry to the ledger. Open to both roles.
pub fn append_entry(
    snapshot: &mut AccountSnapshot,
    draft: EntryDraft,
    now: DateTime<Utc>,
) -> CoreResult<&Transaction> {
    validate_entry_fields(draft.amount, &draft.description, &draft.category)?;

    snapshot.transactions.push(Transaction {
        id: Uuid::new_v4().to_string(),
        user_id: snapshot.id.clone(),
        tx_type: draft.tx_type,
        amount: draft.amount,
        description: draft.description.trim().to_string(),
        category: draft.category.trim().to_string(),
        date: draft.date,
        created_at: now,
        // Manual entries carry no sale profit.
        profit: None,
    });

    Ok(snapshot.transactions.last().expect("just pushed"))
}

/// Applies a partial update to an entry. Open to both roles.
///
/// The entry's id, owning account, creation timestamp, and profit
/// attribution are immutable.
pub fn update_entry<'a>(
    snapshot: &'a mut AccountSnapshot,
    entry_id: &str,
    patch: TransactionPatch,
) -> CoreResult<&'a Transaction> {
    let entry = snapshot
        .transactions
        .iter_mut()
        .find(|t| t.id == entry_id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Transaction".to_string(),
            id: entry_id.to_string(),
        })?;

    if let Some(amount) = patch.amount {
        validation::validate_price("amount", amount)?;
        entry.amount = amount;
    }
    if let Some(description) = patch.description {
        if description.trim().is_empty() {
            return Err(crate::error::ValidationError::Required {
                field: "description".to_string(),
            }
            .into());
        }
        entry.description = description.trim().to_string();
    }
    if let Some(category) = patch.category {
        validation::validate_category(&category)?;
        entry.category = category.trim().to_string();
    }
    if let Some(tx_type) = patch.tx_type {
        entry.tx_type = tx_type;
    }
    if let Some(date) = patch.date {
        entry.date = date;
    }

    Ok(&*entry)
}

/// Deletes one entry. Admin only.
pub fn remove_entry(
    snapshot: &mut AccountSnapshot,
    entry_id: &str,
    actor: &Actor,
) -> CoreResult<Transaction> {
    actor.require_admin("delete transactions")?;

    let idx = snapshot
        .transactions
        .iter()
        .position(|t| t.id == entry_id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Transaction".to_string(),
            id: entry_id.to_string(),
        })?;

    Ok(snapshot.transactions.remove(idx))
}

/// Wipes every ledger entry. Admin only.
///
/// Sale records and the catalog are untouched; resetting the ledger is a
/// bookkeeping action, not an inventory one.
pub fn reset(snapshot: &mut AccountSnapshot, actor: &Actor) -> CoreResult<usize> {
    actor.require_admin("reset the ledger")?;

    let removed = snapshot.transactions.len();
    snapshot.transactions.clear();
    Ok(removed)
}

fn validate_entry_fields(amount: Money, description: &str, category: &str) -> CoreResult<()> {
    validation::validate_price("amount", amount)?;
    if description.trim().is_empty() {
        return Err(crate::error::ValidationError::Required {
            field: "description".to_string(),
        }
        .into());
    }
    validation::validate_category(category)?;
    Ok(())
}

// =============================================================================
// Queries
// =============================================================================

/// Entries on exactly the given date, in insertion order.
pub fn list_by_date(snapshot: &AccountSnapshot, date: NaiveDate) -> Vec<&Transaction> {
    snapshot
        .transactions
        .iter()
        .filter(|t| t.date == date)
        .collect()
}

/// Entries whose date falls in `[from, to]` inclusive, in insertion order.
pub fn list_by_date_range(
    snapshot: &AccountSnapshot,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<&Transaction> {
    snapshot
        .transactions
        .iter()
        .filter(|t| t.date >= from && t.date <= to)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountProfile;

    fn snapshot() -> AccountSnapshot {
        AccountSnapshot::new("acc-1", AccountProfile::default())
    }

    fn draft(tx_type: TransactionType, amount: i64, date: NaiveDate) -> EntryDraft {
        EntryDraft {
            tx_type,
            amount: Money::from_minor(amount),
            description: "Shop rent".to_string(),
            category: "Rent".to_string(),
            date,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_append_entry() {
        let mut snap = snapshot();
        let entry = append_entry(&mut snap, draft(TransactionType::Expense, 50000, day(1)), Utc::now())
            .unwrap();

        assert_eq!(entry.tx_type, TransactionType::Expense);
        assert_eq!(entry.amount, Money::from_minor(50000));
        assert_eq!(entry.user_id, "acc-1");
        assert_eq!(entry.profit, None);
        assert_eq!(snap.transactions.len(), 1);
    }

    #[test]
    fn test_append_rejects_blank_description() {
        let mut snap = snapshot();
        let mut d = draft(TransactionType::Income, 100, day(1));
        d.description = "   ".to_string();
        assert!(append_entry(&mut snap, d, Utc::now()).is_err());
        assert!(snap.transactions.is_empty());
    }

    #[test]
    fn test_update_entry_partial() {
        let mut snap = snapshot();
        let id = append_entry(&mut snap, draft(TransactionType::Expense, 100, day(1)), Utc::now())
            .unwrap()
            .id
            .clone();

        let updated = update_entry(
            &mut snap,
            &id,
            TransactionPatch {
                amount: Some(Money::from_minor(250)),
                date: Some(day(2)),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.amount, Money::from_minor(250));
        assert_eq!(updated.date, day(2));
        // Unpatched fields unchanged
        assert_eq!(updated.description, "Shop rent");
        assert_eq!(updated.tx_type, TransactionType::Expense);
    }

    #[test]
    fn test_update_entry_borrow_outlives_id() {
        let mut snap = snapshot();
        let id = append_entry(&mut snap, draft(TransactionType::Expense, 100, day(1)), Utc::now())
            .unwrap()
            .id
            .clone();

        // The returned reference borrows from the snapshot only; the id
        // string may go out of scope first.
        let amount = {
            let short_lived_id = id.clone();
            update_entry(
                &mut snap,
                &short_lived_id,
                TransactionPatch {
                    amount: Some(Money::from_minor(999)),
                    ..Default::default()
                },
            )
            .unwrap()
            .amount
        };

        assert_eq!(amount, Money::from_minor(999));
        assert_eq!(snap.transactions[0].amount, amount);
    }

    #[test]
    fn test_update_missing_entry() {
        let mut snap = snapshot();
        let err = update_entry(&mut snap, "ghost", TransactionPatch::default()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn test_remove_entry_requires_admin() {
        let mut snap = snapshot();
        let id = append_entry(&mut snap, draft(TransactionType::Income, 100, day(1)), Utc::now())
            .unwrap()
            .id
            .clone();

        let moderator = Actor::moderator("acc-1", "Rahim");
        assert!(matches!(
            remove_entry(&mut snap, &id, &moderator).unwrap_err(),
            CoreError::Permission { .. }
        ));
        assert_eq!(snap.transactions.len(), 1);

        let admin = Actor::admin("acc-1", "My Shop");
        let removed = remove_entry(&mut snap, &id, &admin).unwrap();
        assert_eq!(removed.id, id);
        assert!(snap.transactions.is_empty());
    }

    #[test]
    fn test_reset_requires_admin_and_spares_sales() {
        let mut snap = snapshot();
        append_entry(&mut snap, draft(TransactionType::Income, 100, day(1)), Utc::now()).unwrap();
        append_entry(&mut snap, draft(TransactionType::Expense, 50, day(2)), Utc::now()).unwrap();

        let moderator = Actor::moderator("acc-1", "Rahim");
        assert!(reset(&mut snap, &moderator).is_err());
        assert_eq!(snap.transactions.len(), 2);

        let admin = Actor::admin("acc-1", "My Shop");
        assert_eq!(reset(&mut snap, &admin).unwrap(), 2);
        assert!(snap.transactions.is_empty());
    }

    #[test]
    fn test_list_by_date_and_range() {
        let mut snap = snapshot();
        append_entry(&mut snap, draft(TransactionType::Income, 1, day(1)), Utc::now()).unwrap();
        append_entry(&mut snap, draft(TransactionType::Income, 2, day(3)), Utc::now()).unwrap();
        append_entry(&mut snap, draft(TransactionType::Income, 3, day(5)), Utc::now()).unwrap();

        assert_eq!(list_by_date(&snap, day(3)).len(), 1);
        assert_eq!(list_by_date(&snap, day(2)).len(), 0);

        let range = list_by_date_range(&snap, day(1), day(3));
        assert_eq!(range.len(), 2);
        assert_eq!(range[0].amount, Money::from_minor(1));
        assert_eq!(range[1].amount, Money::from_minor(2));
    }
}
