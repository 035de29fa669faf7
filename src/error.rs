//! Error types for estoque_sync

use std::fmt;

/// Unified error type for store and sync operations
#[derive(Debug)]
pub enum StoreError {
    /// A product or record was not found
    NotFound { entity: &'static str, key: String },
    /// A sale or stock withdrawal exceeds the available balance
    InsufficientStock { product: String, available: f64 },
    /// The operation had no valid line items to commit
    InvalidOperation(String),
    /// A persisted file has content the store cannot interpret
    Parse { file: String, detail: String },
    /// File I/O error
    Io(std::io::Error),
    /// Failed to read or write the product CSV
    Csv(csv::Error),
    /// Failed to read or write a JSON document store
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { entity, key } => {
                write!(f, "{} not found: {}", entity, key)
            }
            StoreError::InsufficientStock { product, available } => {
                write!(
                    f,
                    "Insufficient stock for {}: {} available",
                    product, available
                )
            }
            StoreError::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            StoreError::Parse { file, detail } => {
                write!(f, "Failed to parse {}: {}", file, detail)
            }
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::Csv(e) => write!(f, "CSV error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Csv(e) => Some(e),
            StoreError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Csv(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

/// Result alias for store and sync operations
pub type Result<T> = std::result::Result<T, StoreError>;
