//! Movement log: append-only collections of sales, purchases and stock
//! adjustments in one JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Adjustment, Purchase, Sale};

/// The whole persisted document
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MovementDb {
    #[serde(default)]
    pub vendas: Vec<Sale>,

    #[serde(default)]
    pub compras: Vec<Purchase>,

    #[serde(default)]
    pub ajustes: Vec<Adjustment>,
}

impl MovementDb {
    /// Ids are `max + 1` and never reused; records are never deleted, so
    /// they stay monotonic.
    pub fn next_sale_id(&self) -> u64 {
        self.vendas.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    pub fn next_purchase_id(&self) -> u64 {
        self.compras.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    pub fn next_adjustment_id(&self) -> u64 {
        self.ajustes.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }
}

/// Flat-file store for the movement document
#[derive(Debug, Clone)]
pub struct MovementLog {
    path: PathBuf,
}

impl MovementLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, creating an empty one if the file is missing
    pub fn load(&self) -> Result<MovementDb> {
        if !self.path.exists() {
            log::info!(
                "Movement log {} not found, creating empty document",
                self.path.display()
            );
            let db = MovementDb::default();
            self.save(&db)?;
            return Ok(db);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Whole-file rewrite of the document
    pub fn save(&self, db: &MovementDb) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(db)?)?;
        Ok(())
    }

    pub fn find_sale(&self, id: u64) -> Result<Option<Sale>> {
        Ok(self.load()?.vendas.into_iter().find(|s| s.id == id))
    }

    pub fn find_purchase(&self, id: u64) -> Result<Option<Purchase>> {
        Ok(self.load()?.compras.into_iter().find(|p| p.id == id))
    }
}
