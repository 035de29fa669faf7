//! estoque_sync - inventory and ledger backend
//!
//! Keeps a product catalog (CSV), an append-only movement log and a
//! finance ledger (JSON) in sync: every purchase and sale mutates the
//! stock and generates the matching ledger transaction.

pub mod credentials;
pub mod error;
pub mod ledger;
pub mod models;
pub mod movements;
pub mod paths;
pub mod products;
pub mod reports;
pub mod sync;
pub mod web;

pub use error::{Result, StoreError};
pub use paths::DataPaths;
pub use sync::{Line, SyncBridge};
