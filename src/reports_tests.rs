//! Tests for the query and report helpers

use std::collections::BTreeMap;

use crate::models::{EntryKind, Product, Transaction};
use crate::movements::MovementDb;
use crate::reports::{
    analyze, filter_transactions, in_range, movement_report, summarize_finances,
    summarize_inventory,
};

fn transaction(id: u64, kind: EntryKind, spend_date: &str, amount: f64) -> Transaction {
    Transaction {
        id,
        kind,
        spend_date: spend_date.to_string(),
        created_at: format!("{} 12:00:00", spend_date),
        amount,
        category: "Diversos".to_string(),
        payment_method: "PIX".to_string(),
        description: String::new(),
    }
}

fn product(barcode: &str, stock: f64, sale_price: f64, cost_price: f64) -> Product {
    Product {
        barcode: barcode.to_string(),
        name: format!("Produto {}", barcode),
        stock,
        sale_price,
        cost_price,
    }
}

#[test]
fn test_in_range_inclusive_bounds() {
    assert!(in_range("2025-06-01", "2025-06-01", "2025-06-30"));
    assert!(in_range("2025-06-30", "2025-06-01", "2025-06-30"));
    assert!(in_range("2025-06-15", "2025-06-01", "2025-06-30"));
    assert!(!in_range("2025-05-31", "2025-06-01", "2025-06-30"));
    assert!(!in_range("2025-07-01", "2025-06-01", "2025-06-30"));
}

#[test]
fn test_in_range_open_bounds() {
    assert!(in_range("1999-01-01", "", "2025-06-30"));
    assert!(in_range("2099-01-01", "2025-06-01", ""));
    assert!(in_range("2025-06-15", "", ""));
}

#[test]
fn test_in_range_uses_day_prefix_of_timestamps() {
    // Movement timestamps carry a time-of-day suffix
    assert!(in_range("2025-06-30 23:59:59", "2025-06-01", "2025-06-30"));
    assert!(!in_range("2025-07-01 00:00:00", "2025-06-01", "2025-06-30"));
}

#[test]
fn test_filter_transactions_june_window() {
    let transactions = vec![
        transaction(1, EntryKind::Receber, "2025-05-31", 10.0),
        transaction(2, EntryKind::Receber, "2025-06-01", 20.0),
        transaction(3, EntryKind::Pagar, "2025-06-30", 30.0),
        transaction(4, EntryKind::Pagar, "2025-07-01", 40.0),
    ];

    let filtered = filter_transactions(&transactions, "2025-06-01", "2025-06-30");
    let ids: Vec<u64> = filtered.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_summarize_finances() {
    let transactions = vec![
        transaction(1, EntryKind::Receber, "2025-06-01", 100.0),
        transaction(2, EntryKind::Receber, "2025-06-10", 50.0),
        transaction(3, EntryKind::Pagar, "2025-06-20", 30.0),
    ];

    let summary = summarize_finances(&transactions, "", "");
    assert!((summary.income - 150.0).abs() < 1e-9);
    assert!((summary.expenses - 30.0).abs() < 1e-9);
    assert!((summary.balance - 120.0).abs() < 1e-9);
}

#[test]
fn test_analyze_monthly_buckets() {
    let transactions = vec![
        transaction(1, EntryKind::Receber, "2025-05-15", 100.0),
        transaction(2, EntryKind::Pagar, "2025-05-20", 40.0),
        transaction(3, EntryKind::Receber, "2025-06-02", 70.0),
    ];

    let analytics = analyze(&transactions, "", "");
    assert_eq!(analytics.months.len(), 2);
    assert_eq!(analytics.months[0].month, "2025-05");
    assert!((analytics.months[0].income - 100.0).abs() < 1e-9);
    assert!((analytics.months[0].expenses - 40.0).abs() < 1e-9);
    assert_eq!(analytics.months[1].month, "2025-06");
    assert!((analytics.months[1].income - 70.0).abs() < 1e-9);
}

#[test]
fn test_analyze_balance_timeline_in_date_order() {
    // Out of order on purpose; the timeline must follow spend dates
    let transactions = vec![
        transaction(1, EntryKind::Pagar, "2025-06-10", 30.0),
        transaction(2, EntryKind::Receber, "2025-06-01", 100.0),
    ];

    let analytics = analyze(&transactions, "", "");
    let balances: Vec<f64> = analytics.balance_timeline.iter().map(|p| p.balance).collect();
    assert_eq!(analytics.balance_timeline[0].date, "2025-06-01");
    assert!((balances[0] - 100.0).abs() < 1e-9);
    assert!((balances[1] - 70.0).abs() < 1e-9);
}

#[test]
fn test_analyze_expense_and_income_breakdowns() {
    let mut t1 = transaction(1, EntryKind::Pagar, "2025-06-01", 25.0);
    t1.category = "Alimentação".to_string();
    let mut t2 = transaction(2, EntryKind::Pagar, "2025-06-05", 15.0);
    t2.category = "Alimentação".to_string();
    let mut t3 = transaction(3, EntryKind::Receber, "2025-06-07", 200.0);
    t3.payment_method = "Dinheiro".to_string();

    let analytics = analyze(&[t1, t2, t3], "", "");

    assert!((analytics.expenses_by_category["Alimentação"] - 40.0).abs() < 1e-9);
    assert!((analytics.income_by_payment_method["Dinheiro"] - 200.0).abs() < 1e-9);
    let june: &BTreeMap<String, f64> = &analytics.monthly_expenses_by_category["2025-06"];
    assert!((june["Alimentação"] - 40.0).abs() < 1e-9);
}

#[test]
fn test_summarize_inventory() {
    let products = vec![
        product("1", 10.0, 25.0, 15.0),
        product("2", 4.0, 50.0, 30.0),
        product("3", 5.0, 10.0, 5.0),
    ];

    let summary = summarize_inventory(&products);
    assert_eq!(summary.total_products, 3);
    assert!((summary.total_units - 19.0).abs() < 1e-9);
    assert!((summary.stock_value - (150.0 + 120.0 + 25.0)).abs() < 1e-9);
    assert!((summary.potential_value - (250.0 + 200.0 + 50.0)).abs() < 1e-9);
    // Exactly 5 units is not low stock; the threshold is strict
    assert_eq!(summary.low_stock.len(), 1);
    assert_eq!(summary.low_stock[0].barcode, "2");
}

#[test]
fn test_movement_report_totals_and_window() {
    let mut db = MovementDb::default();
    db.vendas.push(crate::models::Sale {
        id: 1,
        timestamp: "2025-06-10 09:00:00".to_string(),
        customer: String::new(),
        items: Vec::new(),
        gross: 100.0,
        discount: 0.0,
        total: 100.0,
        cost_total: 60.0,
        profit: 40.0,
        payment_method: "PIX".to_string(),
        note: String::new(),
    });
    db.vendas.push(crate::models::Sale {
        id: 2,
        timestamp: "2025-07-02 09:00:00".to_string(),
        customer: String::new(),
        items: Vec::new(),
        gross: 80.0,
        discount: 0.0,
        total: 80.0,
        cost_total: 50.0,
        profit: 30.0,
        payment_method: "PIX".to_string(),
        note: String::new(),
    });
    db.compras.push(crate::models::Purchase {
        id: 1,
        timestamp: "2025-06-15 10:00:00".to_string(),
        supplier: String::new(),
        invoice_number: String::new(),
        items: Vec::new(),
        total: 55.0,
        payment_method: "Boleto".to_string(),
        note: String::new(),
    });

    let report = movement_report(&db, "2025-06-01", "2025-06-30");
    assert_eq!(report.sales.len(), 1);
    assert_eq!(report.purchases.len(), 1);
    assert!(report.adjustments.is_empty());
    assert!((report.total_sales - 100.0).abs() < 1e-9);
    assert!((report.total_purchases - 55.0).abs() < 1e-9);
    assert!((report.total_profit - 40.0).abs() < 1e-9);
}
