//! # Shop Service
//!
//! Orchestration over the pure core: every operation loads the account
//! snapshot, runs a core function on it, and persists the whole next
//! snapshot in one awaited write.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShopService::checkout(actor, draft)                                    │
//! │                                                                         │
//! │  1. snapshot = store.get(actor.account_id)        ← only read          │
//! │  2. result   = bazaar_core::sale::checkout(...)   ← pure, in memory    │
//! │  3. store.put(result.snapshot)  [timeout-guarded] ← only write         │
//! │                                                                         │
//! │  The single put is what makes the checkout's three logical writes      │
//! │  (ledger rows, sale records, stock) atomic: they are all inside one    │
//! │  snapshot document. A failed put surfaces StoreError and the stored    │
//! │  state still holds the pre-checkout snapshot.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent operations on the same account are last-write-wins; a shop
//! runs one till at a time.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, info};
use uuid::Uuid;

use bazaar_core::catalog::{self, VariantSeed};
use bazaar_core::ledger::{self, EntryDraft, TransactionPatch};
use bazaar_core::sale::{self, Invoice, SaleDraft};
use bazaar_core::{
    backup, AccountProfile, AccountSnapshot, Actor, CoreError, Money, Partner, ProductVariant,
    Transaction,
};

use crate::error::{ServiceResult, StoreError};
use crate::store::AccountStore;

/// Default deadline for one snapshot write.
pub const DEFAULT_PUT_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Requests
// =============================================================================

/// Operator input for a bulk stock-in.
#[derive(Debug, Clone)]
pub struct StockInRequest {
    pub name: String,
    pub code: String,
    pub category: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub qty_per_variant: i64,
    pub buy_price: Money,
    pub sell_price: Money,
}

// =============================================================================
// Shop Service
// =============================================================================

/// Account-level operations against a pluggable [`AccountStore`].
#[derive(Clone)]
pub struct ShopService {
    store: Arc<dyn AccountStore>,
    put_timeout: Duration,
}

impl ShopService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        ShopService {
            store,
            put_timeout: DEFAULT_PUT_TIMEOUT,
        }
    }

    /// Overrides the persistence deadline.
    pub fn put_timeout(mut self, timeout: Duration) -> Self {
        self.put_timeout = timeout;
        self
    }

    /// One timeout-guarded write; the only await that touches storage on
    /// the mutation path.
    async fn persist(&self, snapshot: &AccountSnapshot) -> ServiceResult<()> {
        timeout(self.put_timeout, self.store.put(snapshot))
            .await
            .map_err(|_| StoreError::Timeout(self.put_timeout))??;
        Ok(())
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Creates and persists an empty account.
    pub async fn create_account(
        &self,
        account_id: &str,
        profile: AccountProfile,
    ) -> ServiceResult<AccountSnapshot> {
        let snapshot = AccountSnapshot::new(account_id, profile);
        self.persist(&snapshot).await?;
        info!(account_id, "Account created");
        Ok(snapshot)
    }

    /// Loads the current snapshot for read-side work (search, reports).
    pub async fn load(&self, account_id: &str) -> ServiceResult<AccountSnapshot> {
        Ok(self.store.get(account_id).await?)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Bulk stock-in: appends one variant per color×size pair.
    /// Returns the number of variants created.
    pub async fn stock_in(&self, actor: &Actor, request: StockInRequest) -> ServiceResult<usize> {
        let mut snapshot = self.store.get(&actor.account_id).await?;

        let seed = VariantSeed {
            name: request.name,
            code: request.code,
            category: request.category,
        };
        let added = catalog::stock_in(
            &mut snapshot.products,
            &seed,
            &request.colors,
            &request.sizes,
            request.qty_per_variant,
            request.buy_price,
            request.sell_price,
            Utc::now(),
        )?;

        self.persist(&snapshot).await?;
        info!(
            account_id = %actor.account_id,
            variants = added,
            name = %seed.name,
            "Stock-in persisted"
        );
        Ok(added)
    }

    /// Deletes a catalog variant. Admin only.
    pub async fn delete_variant(
        &self,
        actor: &Actor,
        variant_id: &str,
    ) -> ServiceResult<ProductVariant> {
        let mut snapshot = self.store.get(&actor.account_id).await?;
        let removed = catalog::remove_variant(&mut snapshot.products, variant_id, actor)?;
        self.persist(&snapshot).await?;
        info!(account_id = %actor.account_id, variant_id, "Variant deleted");
        Ok(removed)
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Finalizes a cart: ledger rows, sale records, and stock decrements
    /// land in one snapshot write, or none of them do.
    pub async fn checkout(&self, actor: &Actor, draft: &SaleDraft) -> ServiceResult<Invoice> {
        let snapshot = self.store.get(&actor.account_id).await?;

        let invoice_id = generate_invoice_id();
        let now = Utc::now();
        let result = sale::checkout(&snapshot, draft, &invoice_id, now.date_naive(), now)?;

        self.persist(&result.snapshot).await?;
        info!(
            account_id = %actor.account_id,
            invoice_id = %result.invoice.invoice_id,
            lines = result.invoice.lines.len(),
            status = result.invoice.payment_status(),
            "Checkout persisted"
        );
        Ok(result.invoice)
    }

    /// Deletes one sale record from the history.
    ///
    /// Stock is NOT restored; an operator correcting inventory does so via
    /// stock-in.
    pub async fn delete_sale_record(&self, actor: &Actor, record_id: &str) -> ServiceResult<()> {
        let mut snapshot = self.store.get(&actor.account_id).await?;

        let idx = snapshot
            .sales
            .iter()
            .position(|s| s.id == record_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Sale record".to_string(),
                id: record_id.to_string(),
            })?;
        snapshot.sales.remove(idx);

        self.persist(&snapshot).await?;
        debug!(account_id = %actor.account_id, record_id, "Sale record deleted");
        Ok(())
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Records a manual ledger entry. Open to both roles.
    pub async fn record_entry(&self, actor: &Actor, draft: EntryDraft) -> ServiceResult<Transaction> {
        let mut snapshot = self.store.get(&actor.account_id).await?;
        let entry = ledger::append_entry(&mut snapshot, draft, Utc::now())?.clone();
        self.persist(&snapshot).await?;
        debug!(account_id = %actor.account_id, entry_id = %entry.id, "Ledger entry recorded");
        Ok(entry)
    }

    /// Applies a partial update to a ledger entry. Open to both roles.
    pub async fn update_entry(
        &self,
        actor: &Actor,
        entry_id: &str,
        patch: TransactionPatch,
    ) -> ServiceResult<Transaction> {
        let mut snapshot = self.store.get(&actor.account_id).await?;
        let entry = ledger::update_entry(&mut snapshot, entry_id, patch)?.clone();
        self.persist(&snapshot).await?;
        Ok(entry)
    }

    /// Deletes a ledger entry. Admin only.
    pub async fn delete_entry(&self, actor: &Actor, entry_id: &str) -> ServiceResult<Transaction> {
        let mut snapshot = self.store.get(&actor.account_id).await?;
        let removed = ledger::remove_entry(&mut snapshot, entry_id, actor)?;
        self.persist(&snapshot).await?;
        info!(account_id = %actor.account_id, entry_id, "Ledger entry deleted");
        Ok(removed)
    }

    /// Wipes the whole ledger. Admin only. Returns the entry count removed.
    pub async fn reset_ledger(&self, actor: &Actor) -> ServiceResult<usize> {
        let mut snapshot = self.store.get(&actor.account_id).await?;
        let removed = ledger::reset(&mut snapshot, actor)?;
        self.persist(&snapshot).await?;
        info!(account_id = %actor.account_id, removed, "Ledger reset");
        Ok(removed)
    }

    // =========================================================================
    // Partners
    // =========================================================================

    /// Adds a partner contact.
    pub async fn add_partner(
        &self,
        actor: &Actor,
        name: &str,
        mobile: &str,
        description: &str,
    ) -> ServiceResult<Partner> {
        let mut snapshot = self.store.get(&actor.account_id).await?;

        let partner = Partner {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            mobile: mobile.trim().to_string(),
            description: description.trim().to_string(),
        };
        snapshot.partners.push(partner.clone());

        self.persist(&snapshot).await?;
        Ok(partner)
    }

    /// Removes a partner contact.
    pub async fn remove_partner(&self, actor: &Actor, partner_id: &str) -> ServiceResult<()> {
        let mut snapshot = self.store.get(&actor.account_id).await?;

        let idx = snapshot
            .partners
            .iter()
            .position(|p| p.id == partner_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Partner".to_string(),
                id: partner_id.to_string(),
            })?;
        snapshot.partners.remove(idx);

        self.persist(&snapshot).await?;
        Ok(())
    }

    // =========================================================================
    // Backup
    // =========================================================================

    /// Exports the account as a JSON document.
    pub async fn export(&self, account_id: &str) -> ServiceResult<String> {
        let snapshot = self.store.get(account_id).await?;
        Ok(backup::export(&snapshot)?)
    }

    /// Imports a previously exported document, replacing the stored
    /// snapshot for that account. Returns the imported account id.
    pub async fn import(&self, document: &str) -> ServiceResult<String> {
        let snapshot = backup::import(document)?;
        self.persist(&snapshot).await?;
        info!(account_id = %snapshot.id, "Account imported");
        Ok(snapshot.id)
    }
}

/// Mints an invoice id: `INV-` plus a 6-digit clock-derived sequence.
fn generate_invoice_id() -> String {
    let seq = (Utc::now().timestamp_millis() % 900_000 + 100_000) as u32;
    format!("INV-{seq:06}")
}

// =============================================================================
// Unit Tests
// =============================================================================
