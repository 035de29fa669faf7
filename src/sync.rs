//! Sync bridge: couples stock movements to the finance ledger
//!
//! The only cross-store writer. Each purchase or sale mutates the product
//! store, appends to the movement log and appends one ledger transaction.
//! The three files are written in that order with no atomicity across
//! them; a crash in between leaves them out of step.

use crate::error::{Result, StoreError};
use crate::ledger::LedgerStore;
use crate::models::{
    now_timestamp, Adjustment, AdjustmentKind, CategoryKind, EntryKind, Purchase, PurchaseItem,
    Sale, SaleItem,
};
use crate::movements::MovementLog;
use crate::products::ProductStore;

/// Ledger category for bridge-generated expense entries
pub const PURCHASE_CATEGORY: &str = "Compra de Produtos";
/// Ledger category for bridge-generated income entries
pub const SALE_CATEGORY: &str = "Venda de Produtos";
/// Placeholder payment method when the caller leaves it blank
pub const UNSET_PAYMENT_METHOD: &str = "A Definir";

/// One requested line of a purchase or sale. A `None` unit price means
/// "use the product's current price" (cost price on purchases, sale price
/// on sales).
#[derive(Debug, Clone)]
pub struct Line {
    pub barcode: String,
    pub quantity: f64,
    pub unit_price: Option<f64>,
}

impl Line {
    pub fn new(barcode: impl Into<String>, quantity: f64) -> Self {
        Self {
            barcode: barcode.into(),
            quantity,
            unit_price: None,
        }
    }

    pub fn with_price(barcode: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            barcode: barcode.into(),
            quantity,
            unit_price: Some(unit_price),
        }
    }
}

/// The bridge over the three stores
#[derive(Debug, Clone)]
pub struct SyncBridge {
    products: ProductStore,
    movements: MovementLog,
    ledger: LedgerStore,
}

impl SyncBridge {
    pub fn new(products: ProductStore, movements: MovementLog, ledger: LedgerStore) -> Self {
        Self {
            products,
            movements,
            ledger,
        }
    }

    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    pub fn movements(&self) -> &MovementLog {
        &self.movements
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Makes sure the two bridge categories exist in the ledger
    pub fn ensure_ledger_categories(&self) -> Result<()> {
        self.ledger.ensure_categories(&[
            (PURCHASE_CATEGORY, CategoryKind::Despesa),
            (SALE_CATEGORY, CategoryKind::Receita),
        ])
    }

    /// Records a purchase: per line, stock is increased and the product's
    /// cost price is set to the line's unit price (last line wins when a
    /// barcode repeats). Lines with unknown barcodes are skipped silently;
    /// with no valid line at all the operation fails and nothing is
    /// written. A ledger expense over the purchase total is appended.
    pub fn record_purchase(
        &self,
        lines: &[Line],
        supplier: &str,
        invoice_number: &str,
        payment_method: &str,
        note: &str,
    ) -> Result<Purchase> {
        let mut products = self.products.load()?;
        let mut items = Vec::new();
        let mut total = 0.0;

        for line in lines {
            let barcode = line.barcode.trim();
            if barcode.is_empty() {
                continue;
            }
            let Some(product) = products.iter_mut().find(|p| p.barcode == barcode) else {
                log::warn!("Purchase line skipped, unknown barcode: {}", barcode);
                continue;
            };
            let unit_price = line.unit_price.unwrap_or(product.cost_price);
            let subtotal = line.quantity * unit_price;
            items.push(PurchaseItem {
                barcode: barcode.to_string(),
                product_name: product.name.clone(),
                quantity: line.quantity,
                unit_price,
                subtotal,
            });
            total += subtotal;
            product.stock += line.quantity;
            product.cost_price = unit_price;
        }

        if items.is_empty() {
            return Err(StoreError::InvalidOperation(
                "purchase has no valid line items".to_string(),
            ));
        }

        self.products.save(&products)?;

        let mut db = self.movements.load()?;
        let purchase = Purchase {
            id: db.next_purchase_id(),
            timestamp: now_timestamp(),
            supplier: supplier.to_string(),
            invoice_number: invoice_number.to_string(),
            items,
            total,
            payment_method: resolve_payment_method(payment_method),
            note: note.to_string(),
        };
        db.compras.push(purchase.clone());
        self.movements.save(&db)?;

        let mut description = format!("Compra #{}", purchase.id);
        if !purchase.supplier.is_empty() {
            description.push_str(&format!(" - {}", purchase.supplier));
        }
        if !purchase.invoice_number.is_empty() {
            description.push_str(&format!(" - NF: {}", purchase.invoice_number));
        }
        self.ledger.append_transaction(
            EntryKind::Pagar,
            None,
            total,
            PURCHASE_CATEGORY,
            &purchase.payment_method,
            &description,
        )?;

        log::info!(
            "Purchase #{} recorded, {} item(s), total {:.2}",
            purchase.id,
            purchase.items.len(),
            total
        );
        Ok(purchase)
    }

    /// Records a sale. All lines are resolved and validated before any
    /// stock is written: requested quantities are aggregated per barcode
    /// and checked against the available balance, so an aborted sale never
    /// leaves a partial decrement behind. Unknown barcodes are skipped
    /// silently; with no valid line the operation fails. A ledger income
    /// entry over the post-discount total is appended.
    pub fn record_sale(
        &self,
        lines: &[Line],
        customer: &str,
        discount: f64,
        payment_method: &str,
        note: &str,
    ) -> Result<Sale> {
        let mut products = self.products.load()?;
        let mut items = Vec::new();
        let mut required: Vec<(String, f64)> = Vec::new();
        let mut gross = 0.0;
        let mut cost_total = 0.0;

        for line in lines {
            let barcode = line.barcode.trim();
            if barcode.is_empty() {
                continue;
            }
            let Some(product) = products.iter().find(|p| p.barcode == barcode) else {
                log::warn!("Sale line skipped, unknown barcode: {}", barcode);
                continue;
            };

            let requested = match required.iter_mut().find(|(b, _)| b == barcode) {
                Some((_, qty)) => {
                    *qty += line.quantity;
                    *qty
                }
                None => {
                    required.push((barcode.to_string(), line.quantity));
                    line.quantity
                }
            };
            if requested > product.stock {
                return Err(StoreError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock,
                });
            }

            let unit_price = line.unit_price.unwrap_or(product.sale_price);
            let subtotal = line.quantity * unit_price;
            items.push(SaleItem {
                barcode: barcode.to_string(),
                product_name: product.name.clone(),
                quantity: line.quantity,
                unit_price,
                cost_price: product.cost_price,
                subtotal,
            });
            gross += subtotal;
            cost_total += line.quantity * product.cost_price;
        }

        if items.is_empty() {
            return Err(StoreError::InvalidOperation(
                "sale has no valid line items".to_string(),
            ));
        }

        // Validation passed for every line; only now touch the stock.
        for (barcode, quantity) in &required {
            if let Some(product) = products.iter_mut().find(|p| &p.barcode == barcode) {
                product.stock -= quantity;
            }
        }
        self.products.save(&products)?;

        let total = gross - discount;
        let mut db = self.movements.load()?;
        let sale = Sale {
            id: db.next_sale_id(),
            timestamp: now_timestamp(),
            customer: customer.to_string(),
            items,
            gross,
            discount,
            total,
            cost_total,
            profit: total - cost_total,
            payment_method: resolve_payment_method(payment_method),
            note: note.to_string(),
        };
        db.vendas.push(sale.clone());
        self.movements.save(&db)?;

        let mut description = format!("Venda #{}", sale.id);
        if !sale.customer.is_empty() {
            description.push_str(&format!(" - {}", sale.customer));
        }
        self.ledger.append_transaction(
            EntryKind::Receber,
            None,
            total,
            SALE_CATEGORY,
            &sale.payment_method,
            &description,
        )?;

        log::info!(
            "Sale #{} recorded, {} item(s), total {:.2}",
            sale.id,
            sale.items.len(),
            total
        );
        Ok(sale)
    }

    /// Manual stock correction. Writes the product store and the movement
    /// log with a before/after snapshot; adjustments never generate ledger
    /// entries.
    pub fn adjust_stock(
        &self,
        barcode: &str,
        quantity: f64,
        kind: AdjustmentKind,
        reason: &str,
    ) -> Result<Adjustment> {
        let mut products = self.products.load()?;
        let product = products
            .iter_mut()
            .find(|p| p.barcode == barcode)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Product",
                key: barcode.to_string(),
            })?;

        let prior_stock = product.stock;
        let new_stock = match kind {
            AdjustmentKind::Entrada => prior_stock + quantity,
            AdjustmentKind::Saida => {
                if quantity > prior_stock {
                    return Err(StoreError::InsufficientStock {
                        product: product.name.clone(),
                        available: prior_stock,
                    });
                }
                prior_stock - quantity
            }
            AdjustmentKind::Definir => quantity,
        };
        product.stock = new_stock;
        let product_name = product.name.clone();
        self.products.save(&products)?;

        let mut db = self.movements.load()?;
        let adjustment = Adjustment {
            id: db.next_adjustment_id(),
            timestamp: now_timestamp(),
            barcode: barcode.to_string(),
            product_name,
            kind,
            quantity,
            prior_stock,
            new_stock,
            reason: reason.to_string(),
        };
        db.ajustes.push(adjustment.clone());
        self.movements.save(&db)?;

        log::info!(
            "Stock of {} adjusted ({}): {} -> {}",
            barcode,
            kind.as_str(),
            prior_stock,
            new_stock
        );
        Ok(adjustment)
    }
}

fn resolve_payment_method(payment_method: &str) -> String {
    let trimmed = payment_method.trim();
    if trimmed.is_empty() {
        UNSET_PAYMENT_METHOD.to_string()
    } else {
        trimmed.to_string()
    }
}
