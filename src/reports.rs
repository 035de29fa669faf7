//! Query and report helpers over the persisted records
//!
//! Pure functions; loading the data is the caller's concern. Date filters
//! compare the `YYYY-MM-DD` prefix of the stored strings, which sorts
//! lexicographically, and both bounds are inclusive. An empty bound is
//! unbounded on that side.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Adjustment, EntryKind, Product, Purchase, Sale, Transaction};
use crate::movements::MovementDb;

/// Products with less stock than this show up in the low-stock list
pub const LOW_STOCK_THRESHOLD: f64 = 5.0;

/// Whether a stored date (or timestamp) falls inside the inclusive range
pub fn in_range(date: &str, start: &str, end: &str) -> bool {
    let day = date.get(..10).unwrap_or(date);
    (start.is_empty() || day >= start) && (end.is_empty() || day <= end)
}

pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    start: &str,
    end: &str,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| in_range(&t.spend_date, start, end))
        .collect()
}

pub fn filter_sales<'a>(sales: &'a [Sale], start: &str, end: &str) -> Vec<&'a Sale> {
    sales
        .iter()
        .filter(|s| in_range(&s.timestamp, start, end))
        .collect()
}

pub fn filter_purchases<'a>(
    purchases: &'a [Purchase],
    start: &str,
    end: &str,
) -> Vec<&'a Purchase> {
    purchases
        .iter()
        .filter(|p| in_range(&p.timestamp, start, end))
        .collect()
}

pub fn filter_adjustments<'a>(
    adjustments: &'a [Adjustment],
    start: &str,
    end: &str,
) -> Vec<&'a Adjustment> {
    adjustments
        .iter()
        .filter(|a| in_range(&a.timestamp, start, end))
        .collect()
}

/// Income, expenses and balance over a date range
#[derive(Debug, Default, Serialize)]
pub struct FinancialSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

pub fn summarize_finances(transactions: &[Transaction], start: &str, end: &str) -> FinancialSummary {
    let mut summary = FinancialSummary::default();
    for t in filter_transactions(transactions, start, end) {
        match t.kind {
            EntryKind::Receber => summary.income += t.amount,
            EntryKind::Pagar => summary.expenses += t.amount,
        }
    }
    summary.balance = summary.income - summary.expenses;
    summary
}

/// Income and expenses of one `YYYY-MM` bucket
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyFlow {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

/// Running balance after one transaction, in spend-date order
#[derive(Debug, Clone, Serialize)]
pub struct BalancePoint {
    pub date: String,
    pub balance: f64,
}

/// Aggregations backing the analytics views
#[derive(Debug, Default, Serialize)]
pub struct Analytics {
    /// Expense totals per category
    pub expenses_by_category: BTreeMap<String, f64>,
    /// Per-month income/expense buckets, ascending by month
    pub months: Vec<MonthlyFlow>,
    /// Balance evolution in spend-date order
    pub balance_timeline: Vec<BalancePoint>,
    /// Income totals per payment method
    pub income_by_payment_method: BTreeMap<String, f64>,
    /// month -> category -> expense total
    pub monthly_expenses_by_category: BTreeMap<String, BTreeMap<String, f64>>,
}

pub fn analyze(transactions: &[Transaction], start: &str, end: &str) -> Analytics {
    let mut filtered = filter_transactions(transactions, start, end);
    filtered.sort_by(|a, b| a.spend_date.cmp(&b.spend_date));

    let mut analytics = Analytics::default();
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    let mut balance = 0.0;

    for t in filtered {
        let month = t.spend_date.get(..7).unwrap_or(&t.spend_date).to_string();
        let bucket = months.entry(month.clone()).or_insert((0.0, 0.0));
        match t.kind {
            EntryKind::Receber => {
                balance += t.amount;
                bucket.0 += t.amount;
                *analytics
                    .income_by_payment_method
                    .entry(t.payment_method.clone())
                    .or_insert(0.0) += t.amount;
            }
            EntryKind::Pagar => {
                balance -= t.amount;
                bucket.1 += t.amount;
                *analytics
                    .expenses_by_category
                    .entry(t.category.clone())
                    .or_insert(0.0) += t.amount;
                *analytics
                    .monthly_expenses_by_category
                    .entry(month)
                    .or_default()
                    .entry(t.category.clone())
                    .or_insert(0.0) += t.amount;
            }
        }
        analytics.balance_timeline.push(BalancePoint {
            date: t.spend_date.clone(),
            balance,
        });
    }

    analytics.months = months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyFlow {
            month,
            income,
            expenses,
        })
        .collect();
    analytics
}

/// Stock dashboard numbers
#[derive(Debug, Serialize)]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_units: f64,
    /// Stock valued at cost price
    pub stock_value: f64,
    /// Stock valued at sale price
    pub potential_value: f64,
    pub low_stock: Vec<Product>,
}

pub fn summarize_inventory(products: &[Product]) -> InventorySummary {
    InventorySummary {
        total_products: products.len(),
        total_units: products.iter().map(|p| p.stock).sum(),
        stock_value: products.iter().map(|p| p.stock * p.cost_price).sum(),
        potential_value: products.iter().map(|p| p.stock * p.sale_price).sum(),
        low_stock: products
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .cloned()
            .collect(),
    }
}

/// All movements in a date range plus their totals
#[derive(Debug, Serialize)]
pub struct MovementReport {
    pub sales: Vec<Sale>,
    pub purchases: Vec<Purchase>,
    pub adjustments: Vec<Adjustment>,
    pub total_sales: f64,
    pub total_purchases: f64,
    pub total_profit: f64,
}

pub fn movement_report(db: &MovementDb, start: &str, end: &str) -> MovementReport {
    let sales: Vec<Sale> = filter_sales(&db.vendas, start, end)
        .into_iter()
        .cloned()
        .collect();
    let purchases: Vec<Purchase> = filter_purchases(&db.compras, start, end)
        .into_iter()
        .cloned()
        .collect();
    let adjustments: Vec<Adjustment> = filter_adjustments(&db.ajustes, start, end)
        .into_iter()
        .cloned()
        .collect();

    MovementReport {
        total_sales: sales.iter().map(|s| s.total).sum(),
        total_purchases: purchases.iter().map(|p| p.total).sum(),
        total_profit: sales.iter().map(|s| s.profit).sum(),
        sales,
        purchases,
        adjustments,
    }
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
