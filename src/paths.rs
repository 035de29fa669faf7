use std::path::{Path, PathBuf};

pub const PRODUCTS_FILE: &str = "produtos.csv";
pub const MOVEMENTS_FILE: &str = "estoque_db.json";
pub const LEDGER_FILE: &str = "database.json";
pub const CREDENTIALS_FILE: &str = "credentials.enc";

/// Resolved locations of the persisted data files.
///
/// Built once at startup from the data directory and handed to the stores,
/// so nothing reads file locations from module globals.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub products_csv: PathBuf,
    pub movements_db: PathBuf,
    pub ledger_db: PathBuf,
    pub credentials: PathBuf,
}

impl DataPaths {
    pub fn new(base: &Path) -> Self {
        Self {
            products_csv: base.join(PRODUCTS_FILE),
            movements_db: base.join(MOVEMENTS_FILE),
            ledger_db: base.join(LEDGER_FILE),
            credentials: base.join(CREDENTIALS_FILE),
        }
    }
}
