//! # Sale Composer
//!
//! Cart state for an in-progress sale and the checkout reconciliation that
//! turns it into ledger entries, sale records, and stock decrements.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  SaleDraft (cart)                                                   │
//! │    lines: [variant × qty × negotiated price]                        │
//! │    paid:  operator-entered amount                                   │
//! │       │                                                             │
//! │       ▼ checkout(snapshot, draft, invoice_id, date)                 │
//! │                                                                     │
//! │  1. every line resolves, qty > 0, price > 0        (else reject)    │
//! │  2. 0 ≤ paid ≤ subtotal                            (else reject)    │
//! │  3. per-variant total qty ≤ stock                  (else reject)    │
//! │  ── nothing written before this point ──                            │
//! │  4. append one SaleRecord per line                                  │
//! │  5. paid > 0 → INCOME row (carries the whole cart profit)           │
//! │     due  > 0 → DUE row    (carries profit only if nothing paid)     │
//! │  6. decrement each variant's stock                                  │
//! │  7. return next snapshot + Invoice view                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `checkout` is a pure function from a snapshot to the next snapshot. The
//! caller persists the result in ONE store write, so the three logical
//! writes land atomically or not at all; a precondition failure leaves the
//! input snapshot byte-for-byte unchanged because it is never mutated.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog;
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{AccountSnapshot, ProductVariant, SaleRecord, Transaction, TransactionType};
use crate::validation;

/// Ledger category for the paid portion of a sale.
pub const SALES_CATEGORY: &str = "Sales";
/// Ledger category for the unpaid remainder of a sale.
pub const SALES_DUES_CATEGORY: &str = "Sales Dues";

// =============================================================================
// Sale Line
// =============================================================================

/// A prospective purchase of one variant. Cart-only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    /// Cart-local line id, for edits while the sale is in progress.
    pub id: String,
    /// The resolved catalog variant this line sells.
    pub variant_id: String,
    pub quantity: i64,
    /// Negotiated unit price — may differ from the catalog sell price.
    pub unit_price: Money,
}

impl SaleLine {
    pub fn new(variant_id: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        SaleLine {
            id: Uuid::new_v4().to_string(),
            variant_id: variant_id.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity × unit_price`.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// `quantity × (unit_price − buy_price)`.
    pub fn line_profit(&self, variant: &ProductVariant) -> Money {
        (self.unit_price - variant.buy_price).multiply_quantity(self.quantity)
    }
}

/// Partial update to a sale line.
#[derive(Debug, Clone, Default)]
pub struct LinePatch {
    pub variant_id: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<Money>,
}

// =============================================================================
// Sale Draft
// =============================================================================

/// An in-progress sale: customer info, cart lines, and the paid amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    /// Optional customer name; invoices show "Walk-in" when empty.
    pub customer_name: String,
    pub customer_mobile: String,
    pub lines: Vec<SaleLine>,
    /// Amount the customer handed over. The remainder becomes a DUE entry.
    pub paid: Money,
}

/// Pure totals over a draft, safe to recompute on every keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotals {
    pub subtotal: Money,
    pub total_profit: Money,
    pub due: Money,
}

impl SaleDraft {
    pub fn new() -> Self {
        SaleDraft::default()
    }

    /// Appends a line for the given variant.
    pub fn add_line(
        &mut self,
        variant_id: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> CoreResult<&SaleLine> {
        validation::validate_line_count(self.lines.len())?;
        validation::validate_quantity(quantity)?;
        validation::validate_unit_price(unit_price)?;

        self.lines
            .push(SaleLine::new(variant_id, quantity, unit_price));
        Ok(self.lines.last().expect("just pushed"))
    }

    /// Removes a line. Rejected if it would leave the sale empty — an
    /// in-progress sale always keeps at least one line.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<()> {
        if self.lines.len() <= 1 {
            return Err(ValidationError::LastSaleLine.into());
        }

        let idx = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| crate::error::CoreError::NotFound {
                entity: "Sale line".to_string(),
                id: line_id.to_string(),
            })?;

        self.lines.remove(idx);
        Ok(())
    }

    /// Applies a partial update to a line.
    pub fn update_line(&mut self, line_id: &str, patch: LinePatch) -> CoreResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| crate::error::CoreError::NotFound {
                entity: "Sale line".to_string(),
                id: line_id.to_string(),
            })?;

        if let Some(qty) = patch.quantity {
            validation::validate_quantity(qty)?;
            line.quantity = qty;
        }
        if let Some(price) = patch.unit_price {
            validation::validate_unit_price(price)?;
            line.unit_price = price;
        }
        if let Some(variant_id) = patch.variant_id {
            line.variant_id = variant_id;
        }

        Ok(())
    }

    /// Computes subtotal, profit, and due against the current catalog.
    ///
    /// Lenient by design: a line whose variant is not (yet) resolved
    /// contributes its total but zero profit, so the totals panel can
    /// refresh while the operator is still typing. `checkout` applies the
    /// strict rules.
    pub fn totals(&self, products: &[ProductVariant]) -> SaleTotals {
        let subtotal: Money = self.lines.iter().map(SaleLine::line_total).sum();
        let total_profit: Money = self
            .lines
            .iter()
            .filter_map(|line| {
                catalog::variant_by_id(products, &line.variant_id)
                    .ok()
                    .map(|v| line.line_profit(v))
            })
            .sum();

        SaleTotals {
            subtotal,
            total_profit,
            due: subtotal.minus_clamped(self.paid),
        }
    }

    fn customer_label(&self) -> &str {
        let name = self.customer_name.trim();
        if name.is_empty() {
            "Walk-in"
        } else {
            name
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// One line of a completed invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Read-only summary of one completed checkout, for display and printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_id: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_mobile: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Money,
    pub paid: Money,
    pub due: Money,
}

impl Invoice {
    /// Payment status label as printed on the invoice header.
    pub fn payment_status(&self) -> &'static str {
        if self.due.is_zero() {
            "Full Paid"
        } else if self.paid.is_positive() {
            "Partial Paid"
        } else {
            "Full Due"
        }
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// The result of a successful checkout: the next account snapshot (with
/// sale records, ledger rows, and decremented stock applied) and the
/// invoice view. The caller persists `snapshot` in one store write.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub snapshot: AccountSnapshot,
    pub invoice: Invoice,
}

/// Finalizes a draft against an account snapshot.
///
/// Preconditions are checked in order, failing fast on the first
/// violation; any failure returns with the input untouched — there is no
/// partial-checkout state. See the module docs for the full flow.
pub fn checkout(
    snapshot: &AccountSnapshot,
    draft: &SaleDraft,
    invoice_id: &str,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> CoreResult<Checkout> {
    // Precondition 1: every line resolves to a real variant with a valid
    // quantity and price.
    if draft.lines.is_empty() {
        return Err(ValidationError::IncompleteSaleLine.into());
    }
    let mut resolved: Vec<(&SaleLine, &ProductVariant)> = Vec::with_capacity(draft.lines.len());
    for line in &draft.lines {
        if line.quantity <= 0 || !line.unit_price.is_positive() {
            return Err(ValidationError::IncompleteSaleLine.into());
        }
        let variant = catalog::variant_by_id(&snapshot.products, &line.variant_id)
            .map_err(|_| ValidationError::IncompleteSaleLine)?;
        resolved.push((line, variant));
    }

    let subtotal: Money = draft.lines.iter().map(SaleLine::line_total).sum();
    let total_profit: Money = resolved
        .iter()
        .map(|(line, variant)| line.line_profit(variant))
        .sum();

    // Precondition 2: the split must conserve the subtotal.
    validation::validate_paid_amount(draft.paid, subtotal)?;
    let due = subtotal.minus_clamped(draft.paid);

    // Precondition 3: stock suffices for every variant, summed across all
    // lines that reference it — two lines of the same variant must not
    // slip past a per-line check. Checked before any write so an over-sell
    // aborts with nothing changed.
    let mut requested: HashMap<&str, i64> = HashMap::new();
    for (line, _) in &resolved {
        *requested.entry(line.variant_id.as_str()).or_insert(0) += line.quantity;
    }
    for (_, variant) in &resolved {
        let total = requested[variant.id.as_str()];
        if total > variant.stock_quantity {
            return Err(crate::error::CoreError::InsufficientStock {
                product: variant.name.clone(),
                available: variant.stock_quantity,
                requested: total,
            });
        }
    }

    // All checks passed: build the next snapshot.
    let mut next = snapshot.clone();

    let mut invoice_lines = Vec::with_capacity(resolved.len());
    for (line, variant) in &resolved {
        next.sales.push(SaleRecord {
            id: Uuid::new_v4().to_string(),
            invoice_id: invoice_id.to_string(),
            date,
            product_name: variant.name.clone(),
            category: variant.category.clone(),
            qty: line.quantity,
            sell_price: line.unit_price,
            buy_price: variant.buy_price,
            profit: line.line_profit(variant),
        });
        invoice_lines.push(InvoiceLine {
            product_name: variant.name.clone(),
            color: variant.color.clone(),
            size: variant.size.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total(),
        });
    }

    let common_desc = format!(
        "{} - {} ({} items)",
        invoice_id,
        draft.customer_label(),
        draft.lines.len()
    );

    if draft.paid.is_positive() {
        let suffix = if due.is_positive() {
            " (Partial Payment)"
        } else {
            " (Full Paid)"
        };
        next.transactions.push(Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: snapshot.id.clone(),
            tx_type: TransactionType::Income,
            amount: draft.paid,
            description: format!("{common_desc}{suffix}"),
            category: SALES_CATEGORY.to_string(),
            date,
            created_at: now,
            // The whole cart profit rides on the INCOME row.
            profit: Some(total_profit),
        });
    }

    if due.is_positive() {
        let suffix = if draft.paid.is_positive() {
            " (Remaining Due)"
        } else {
            " (Full Due)"
        };
        next.transactions.push(Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: snapshot.id.clone(),
            tx_type: TransactionType::Due,
            amount: due,
            description: format!("{common_desc}{suffix}"),
            category: SALES_DUES_CATEGORY.to_string(),
            date,
            created_at: now,
            // Profit lands here only for a fully unpaid sale, never on
            // both rows.
            profit: if draft.paid.is_positive() {
                None
            } else {
                Some(total_profit)
            },
        });
    }

    for line in &draft.lines {
        catalog::decrement_stock(&mut next.products, &line.variant_id, line.quantity)?;
    }

    let invoice = Invoice {
        invoice_id: invoice_id.to_string(),
        date,
        customer_name: draft.customer_label().to_string(),
        customer_mobile: draft.customer_mobile.clone(),
        lines: invoice_lines,
        subtotal,
        paid: draft.paid,
        due,
    };

    Ok(Checkout {
        snapshot: next,
        invoice,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
