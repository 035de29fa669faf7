//! Product store backed by the `;`-delimited product CSV
//!
//! The store is the sole writer of the file. Every operation is a whole-file
//! read or rewrite with no locking; concurrent writers race.

use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::models::Product;

/// How `adjust_stock` combines the quantity with the current balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockMode {
    Add,
    Subtract,
    Set,
}

/// Flat-file table of products keyed by barcode
#[derive(Debug, Clone)]
pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all products, creating the file with the two example rows if
    /// it does not exist yet.
    pub fn load(&self) -> Result<Vec<Product>> {
        if !self.path.exists() {
            self.seed()?;
        }

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut products = Vec::new();
        for result in rdr.deserialize() {
            let product: Product = result.map_err(|e| StoreError::Parse {
                file: self.path.display().to_string(),
                detail: e.to_string(),
            })?;
            products.push(product);
        }
        Ok(products)
    }

    /// Rewrites the whole file: header first, rows in the given order.
    pub fn save(&self, products: &[Product]) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_path(&self.path)?;
        for product in products {
            wtr.serialize(product)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Finds a product by its barcode
    pub fn find(&self, barcode: &str) -> Result<Option<Product>> {
        Ok(self.load()?.into_iter().find(|p| p.barcode == barcode))
    }

    /// Case-insensitive name match or barcode substring match
    pub fn search(&self, term: &str) -> Result<Vec<Product>> {
        let products = self.load()?;
        if term.is_empty() {
            return Ok(products);
        }
        let lower = term.to_lowercase();
        Ok(products
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&lower) || p.barcode.contains(term))
            .collect())
    }

    /// Appends a new product; the barcode must not be in use.
    pub fn register(&self, product: Product) -> Result<()> {
        let mut products = self.load()?;
        if products.iter().any(|p| p.barcode == product.barcode) {
            return Err(StoreError::InvalidOperation(format!(
                "barcode {} is already registered",
                product.barcode
            )));
        }
        products.push(product);
        self.save(&products)
    }

    /// Updates name and prices of an existing product; stock is only
    /// changed through purchases, sales and adjustments.
    pub fn update(
        &self,
        barcode: &str,
        name: &str,
        sale_price: f64,
        cost_price: f64,
    ) -> Result<()> {
        let mut products = self.load()?;
        let product = products
            .iter_mut()
            .find(|p| p.barcode == barcode)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Product",
                key: barcode.to_string(),
            })?;
        product.name = name.to_string();
        product.sale_price = sale_price;
        product.cost_price = cost_price;
        self.save(&products)
    }

    /// Removes a product by barcode
    pub fn delete(&self, barcode: &str) -> Result<()> {
        let mut products = self.load()?;
        let before = products.len();
        products.retain(|p| p.barcode != barcode);
        if products.len() == before {
            return Err(StoreError::NotFound {
                entity: "Product",
                key: barcode.to_string(),
            });
        }
        self.save(&products)
    }

    /// Applies a raw stock change. Subtracting below zero is permitted
    /// here; the availability guard lives in the sync bridge.
    pub fn adjust_stock(&self, barcode: &str, quantity: f64, mode: StockMode) -> Result<()> {
        let mut products = self.load()?;
        let product = products
            .iter_mut()
            .find(|p| p.barcode == barcode)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Product",
                key: barcode.to_string(),
            })?;
        match mode {
            StockMode::Add => product.stock += quantity,
            StockMode::Subtract => product.stock -= quantity,
            StockMode::Set => product.stock = quantity,
        }
        self.save(&products)
    }

    fn seed(&self) -> Result<()> {
        log::info!(
            "Product file {} not found, creating with example rows",
            self.path.display()
        );
        self.save(&[
            Product {
                barcode: "7891234567890".to_string(),
                name: "Produto Exemplo 1".to_string(),
                stock: 10.0,
                sale_price: 25.90,
                cost_price: 15.50,
            },
            Product {
                barcode: "7891234567891".to_string(),
                name: "Produto Exemplo 2".to_string(),
                stock: 5.0,
                sale_price: 49.90,
                cost_price: 30.00,
            },
        ])
    }
}
