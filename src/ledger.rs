//! Ledger store: financial transactions, categories and payment methods
//! in one JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{now_timestamp, today, Category, CategoryKind, EntryKind, Transaction};

/// The whole persisted document
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LedgerDb {
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub payment_methods: Vec<String>,
}

impl LedgerDb {
    pub fn next_transaction_id(&self) -> u64 {
        self.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Category names usable for entries of the given kind
    pub fn categories_for(&self, kind: EntryKind) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.kind.accepts(kind))
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Flat-file store for the ledger document
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, seeding the default categories and payment
    /// methods if the file is missing.
    pub fn load(&self) -> Result<LedgerDb> {
        if !self.path.exists() {
            log::info!(
                "Ledger {} not found, creating with default categories",
                self.path.display()
            );
            let db = Self::default_db();
            self.save(&db)?;
            return Ok(db);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Whole-file rewrite of the document
    pub fn save(&self, db: &LedgerDb) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(db)?)?;
        Ok(())
    }

    /// Appends a transaction and returns its id. The spend date defaults
    /// to today when not given (bridge-generated entries).
    pub fn append_transaction(
        &self,
        kind: EntryKind,
        spend_date: Option<&str>,
        amount: f64,
        category: &str,
        payment_method: &str,
        description: &str,
    ) -> Result<Transaction> {
        let mut db = self.load()?;
        let transaction = Transaction {
            id: db.next_transaction_id(),
            kind,
            spend_date: spend_date.map(str::to_string).unwrap_or_else(today),
            created_at: now_timestamp(),
            amount,
            category: category.to_string(),
            payment_method: payment_method.to_string(),
            description: description.to_string(),
        };
        db.transactions.push(transaction.clone());
        self.save(&db)?;
        Ok(transaction)
    }

    /// Appends a category
    pub fn add_category(&self, name: &str, kind: CategoryKind) -> Result<()> {
        let mut db = self.load()?;
        db.categories.push(Category {
            name: name.to_string(),
            kind,
        });
        self.save(&db)
    }

    /// Adds any of the given categories that are not present yet.
    /// Idempotent; run at startup so the bridge categories always exist.
    pub fn ensure_categories(&self, categories: &[(&str, CategoryKind)]) -> Result<()> {
        let mut db = self.load()?;
        let mut changed = false;
        for (name, kind) in categories {
            if !db.categories.iter().any(|c| c.name == *name) {
                db.categories.push(Category {
                    name: name.to_string(),
                    kind: *kind,
                });
                changed = true;
            }
        }
        if changed {
            self.save(&db)?;
        }
        Ok(())
    }

    fn default_db() -> LedgerDb {
        LedgerDb {
            transactions: Vec::new(),
            categories: vec![
                Category {
                    name: "Salário".to_string(),
                    kind: CategoryKind::Receita,
                },
                Category {
                    name: "Venda".to_string(),
                    kind: CategoryKind::Receita,
                },
                Category {
                    name: "Alimentação".to_string(),
                    kind: CategoryKind::Despesa,
                },
                Category {
                    name: "Limpeza".to_string(),
                    kind: CategoryKind::Despesa,
                },
                Category {
                    name: "Aluguel".to_string(),
                    kind: CategoryKind::Despesa,
                },
                Category {
                    name: "Diversos".to_string(),
                    kind: CategoryKind::Ambos,
                },
            ],
            payment_methods: vec![
                "PIX".to_string(),
                "Cartão".to_string(),
                "Dinheiro".to_string(),
                "Boleto".to_string(),
                "Outros".to_string(),
            ],
        }
    }
}
