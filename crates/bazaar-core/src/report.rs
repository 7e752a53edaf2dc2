//! # Reporting Aggregator
//!
//! Read-side summaries over the ledger and the sale history. Pure folds —
//! no invariants of its own, no mutation.
//!
//! ## Report Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  summarize_by_type  →  { income, expense, dues }                    │
//! │  daily_ledger       →  [ { date, income, expense, dues, profit } ]  │
//! │                        ascending by date                            │
//! │  category_profit    →  { category → { qty, profit, total_sales } }  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries without an attached profit contribute zero profit. All sums are
//! exact integer minor-unit additions; there is no floating point anywhere
//! in the report path.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{SaleRecord, Transaction, TransactionType};

// =============================================================================
// Date Filter
// =============================================================================

/// Inclusive date window for a report. `None` bounds are open-ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateFilter {
    /// Unbounded filter: every record passes.
    pub fn all() -> Self {
        DateFilter::default()
    }

    /// Exactly one day.
    pub fn on(date: NaiveDate) -> Self {
        DateFilter {
            from: Some(date),
            to: Some(date),
        }
    }

    /// Inclusive `[from, to]` range.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        DateFilter {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

// =============================================================================
// Type Summary
// =============================================================================

/// Partition-and-sum of ledger entries by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    pub income: Money,
    pub expense: Money,
    pub dues: Money,
}

/// Sums entry amounts per transaction type over the filter window.
pub fn summarize_by_type(transactions: &[Transaction], filter: DateFilter) -> TypeSummary {
    let mut summary = TypeSummary::default();

    for tx in transactions.iter().filter(|t| filter.contains(t.date)) {
        match tx.tx_type {
            TransactionType::Income => summary.income += tx.amount,
            TransactionType::Expense => summary.expense += tx.amount,
            TransactionType::Due => summary.dues += tx.amount,
        }
    }

    summary
}

// =============================================================================
// Daily Ledger
// =============================================================================

/// One day's aggregated ledger activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRow {
    pub date: NaiveDate,
    pub income: Money,
    pub expense: Money,
    pub dues: Money,
    /// Σ of attached profits for the day, missing profit counted as zero.
    pub profit: Money,
}

/// Groups entries by date and sums each group, ascending by date.
pub fn daily_ledger(transactions: &[Transaction], filter: DateFilter) -> Vec<DailyRow> {
    // BTreeMap keeps the groups in date order.
    let mut days: BTreeMap<NaiveDate, DailyRow> = BTreeMap::new();

    for tx in transactions.iter().filter(|t| filter.contains(t.date)) {
        let row = days.entry(tx.date).or_insert(DailyRow {
            date: tx.date,
            income: Money::zero(),
            expense: Money::zero(),
            dues: Money::zero(),
            profit: Money::zero(),
        });

        match tx.tx_type {
            TransactionType::Income => row.income += tx.amount,
            TransactionType::Expense => row.expense += tx.amount,
            TransactionType::Due => row.dues += tx.amount,
        }
        row.profit += tx.profit.unwrap_or_else(Money::zero);
    }

    days.into_values().collect()
}

// =============================================================================
// Category Profit
// =============================================================================

/// Per-category accumulation over the sale history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub qty: i64,
    pub profit: Money,
    /// Σ `qty × sell_price` per record.
    pub total_sales: Money,
}

/// Folds sale records into per-category quantity, profit, and revenue.
pub fn category_profit(sales: &[SaleRecord], filter: DateFilter) -> HashMap<String, CategoryStat> {
    let mut categories: HashMap<String, CategoryStat> = HashMap::new();

    for record in sales.iter().filter(|s| filter.contains(s.date)) {
        let stat = categories.entry(record.category.clone()).or_default();
        stat.qty += record.qty;
        stat.profit += record.profit;
        stat.total_sales += record.sell_price.multiply_quantity(record.qty);
    }

    categories
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn tx(tx_type: TransactionType, amount: i64, date: NaiveDate, profit: Option<i64>) -> Transaction {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "acc-1".to_string(),
            tx_type,
            amount: Money::from_minor(amount),
            description: String::new(),
            category: String::new(),
            date,
            created_at: Utc::now(),
            profit: profit.map(Money::from_minor),
        }
    }

    fn record(category: &str, qty: i64, sell: i64, profit: i64, date: NaiveDate) -> SaleRecord {
        SaleRecord {
            id: uuid::Uuid::new_v4().to_string(),
            invoice_id: "INV-100001".to_string(),
            date,
            product_name: "Item".to_string(),
            category: category.to_string(),
            qty,
            sell_price: Money::from_minor(sell),
            buy_price: Money::zero(),
            profit: Money::from_minor(profit),
        }
    }

    #[test]
    fn test_summarize_by_type() {
        let txs = vec![
            tx(TransactionType::Income, 20000, day(1), Some(10000)),
            tx(TransactionType::Due, 5000, day(1), None),
            tx(TransactionType::Expense, 3000, day(2), None),
            tx(TransactionType::Income, 1000, day(5), None),
        ];

        let all = summarize_by_type(&txs, DateFilter::all());
        assert_eq!(all.income, Money::from_minor(21000));
        assert_eq!(all.expense, Money::from_minor(3000));
        assert_eq!(all.dues, Money::from_minor(5000));

        let first_day = summarize_by_type(&txs, DateFilter::on(day(1)));
        assert_eq!(first_day.income, Money::from_minor(20000));
        assert_eq!(first_day.dues, Money::from_minor(5000));
        assert_eq!(first_day.expense, Money::zero());
    }

    #[test]
    fn test_daily_ledger_sorted_ascending() {
        // Deliberately out of order
        let txs = vec![
            tx(TransactionType::Income, 100, day(9), Some(40)),
            tx(TransactionType::Expense, 30, day(2), None),
            tx(TransactionType::Income, 200, day(2), Some(60)),
            tx(TransactionType::Due, 50, day(9), None),
        ];

        let rows = daily_ledger(&txs, DateFilter::all());
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].date, day(2));
        assert_eq!(rows[0].income, Money::from_minor(200));
        assert_eq!(rows[0].expense, Money::from_minor(30));
        assert_eq!(rows[0].profit, Money::from_minor(60));

        assert_eq!(rows[1].date, day(9));
        assert_eq!(rows[1].income, Money::from_minor(100));
        assert_eq!(rows[1].dues, Money::from_minor(50));
        // Missing profit counted as zero
        assert_eq!(rows[1].profit, Money::from_minor(40));
    }

    #[test]
    fn test_daily_ledger_respects_filter() {
        let txs = vec![
            tx(TransactionType::Income, 100, day(1), None),
            tx(TransactionType::Income, 200, day(15), None),
        ];

        let rows = daily_ledger(&txs, DateFilter::between(day(10), day(20)));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, day(15));
    }

    #[test]
    fn test_category_profit_accumulates() {
        let sales = vec![
            record("Shirts", 2, 10000, 8000, day(1)),
            record("Shirts", 1, 12000, 5000, day(3)),
            record("Accessories", 1, 5000, 2000, day(3)),
        ];

        let stats = category_profit(&sales, DateFilter::all());
        assert_eq!(stats.len(), 2);

        let shirts = &stats["Shirts"];
        assert_eq!(shirts.qty, 3);
        assert_eq!(shirts.profit, Money::from_minor(13000));
        // 2×100 + 1×120
        assert_eq!(shirts.total_sales, Money::from_minor(32000));

        let acc = &stats["Accessories"];
        assert_eq!(acc.qty, 1);
        assert_eq!(acc.total_sales, Money::from_minor(5000));
    }
}
