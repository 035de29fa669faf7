use chrono::Local;
use serde::{Deserialize, Serialize};

/// A catalog product, one row of the `;`-delimited product CSV.
///
/// The barcode is the primary key; stock and prices are floats to match
/// the persisted values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "codigo_barras")]
    pub barcode: String,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "saldo")]
    pub stock: f64,

    #[serde(rename = "preco_venda")]
    pub sale_price: f64,

    #[serde(rename = "preco_compra")]
    pub cost_price: f64,
}

/// One line of a committed purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(rename = "codigo_barras")]
    pub barcode: String,

    #[serde(rename = "nome_produto")]
    pub product_name: String,

    #[serde(rename = "quantidade")]
    pub quantity: f64,

    #[serde(rename = "preco_unitario")]
    pub unit_price: f64,

    pub subtotal: f64,
}

/// A committed purchase. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: u64,

    #[serde(rename = "data")]
    pub timestamp: String,

    #[serde(rename = "fornecedor")]
    pub supplier: String,

    #[serde(rename = "numero_nf")]
    pub invoice_number: String,

    #[serde(rename = "itens")]
    pub items: Vec<PurchaseItem>,

    #[serde(rename = "valor_total")]
    pub total: f64,

    #[serde(rename = "forma_pagamento")]
    pub payment_method: String,

    #[serde(rename = "observacao")]
    pub note: String,
}

/// One line of a committed sale. Carries the cost price at sale time so
/// profit stays stable if the product's cost changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(rename = "codigo_barras")]
    pub barcode: String,

    #[serde(rename = "nome_produto")]
    pub product_name: String,

    #[serde(rename = "quantidade")]
    pub quantity: f64,

    #[serde(rename = "preco_unitario")]
    pub unit_price: f64,

    #[serde(rename = "preco_custo")]
    pub cost_price: f64,

    pub subtotal: f64,
}

/// A committed sale. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: u64,

    #[serde(rename = "data")]
    pub timestamp: String,

    #[serde(rename = "cliente")]
    pub customer: String,

    #[serde(rename = "itens")]
    pub items: Vec<SaleItem>,

    #[serde(rename = "valor_bruto")]
    pub gross: f64,

    #[serde(rename = "desconto")]
    pub discount: f64,

    #[serde(rename = "valor_total")]
    pub total: f64,

    #[serde(rename = "custo_total")]
    pub cost_total: f64,

    #[serde(rename = "lucro")]
    pub profit: f64,

    #[serde(rename = "forma_pagamento")]
    pub payment_method: String,

    #[serde(rename = "observacao")]
    pub note: String,
}

/// Kind of manual stock adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// Adds the quantity to the current stock
    Entrada,
    /// Subtracts the quantity (rejected beyond the available balance)
    Saida,
    /// Overwrites the stock with the quantity
    Definir,
}

impl AdjustmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::Entrada => "entrada",
            AdjustmentKind::Saida => "saida",
            AdjustmentKind::Definir => "definir",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "entrada" => Some(AdjustmentKind::Entrada),
            "saida" => Some(AdjustmentKind::Saida),
            "definir" => Some(AdjustmentKind::Definir),
            _ => None,
        }
    }
}

/// A manual stock correction with a before/after snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub id: u64,

    #[serde(rename = "data")]
    pub timestamp: String,

    #[serde(rename = "codigo_barras")]
    pub barcode: String,

    #[serde(rename = "nome_produto")]
    pub product_name: String,

    #[serde(rename = "tipo_ajuste")]
    pub kind: AdjustmentKind,

    #[serde(rename = "quantidade")]
    pub quantity: f64,

    #[serde(rename = "saldo_anterior")]
    pub prior_stock: f64,

    #[serde(rename = "saldo_novo")]
    pub new_stock: f64,

    #[serde(rename = "motivo")]
    pub reason: String,
}

/// Direction of a ledger entry: `pagar` is an expense, `receber` income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Pagar,
    Receber,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Pagar => "pagar",
            EntryKind::Receber => "receber",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pagar" => Some(EntryKind::Pagar),
            "receber" => Some(EntryKind::Receber),
            _ => None,
        }
    }
}

/// A financial transaction in the ledger, user-entered or generated by
/// the sync bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,

    #[serde(rename = "tipo")]
    pub kind: EntryKind,

    #[serde(rename = "data_gasto")]
    pub spend_date: String,

    #[serde(rename = "data_criacao")]
    pub created_at: String,

    #[serde(rename = "valor")]
    pub amount: f64,

    #[serde(rename = "categoria")]
    pub category: String,

    #[serde(rename = "forma_pagamento")]
    pub payment_method: String,

    #[serde(rename = "descricao")]
    pub description: String,
}

/// Which entry kinds a category applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Receita,
    Despesa,
    Ambos,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Receita => "receita",
            CategoryKind::Despesa => "despesa",
            CategoryKind::Ambos => "ambos",
        }
    }

    /// Whether the category can be used for entries of the given kind
    pub fn accepts(&self, kind: EntryKind) -> bool {
        match self {
            CategoryKind::Ambos => true,
            CategoryKind::Receita => kind == EntryKind::Receber,
            CategoryKind::Despesa => kind == EntryKind::Pagar,
        }
    }
}

/// A ledger category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "tipo")]
    pub kind: CategoryKind,
}

/// Current local time in the persisted timestamp format
pub fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current local day as a lexicographically sortable `YYYY-MM-DD` string
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
