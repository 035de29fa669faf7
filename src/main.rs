//! estoque_sync - inventory and ledger backend
//!
//! Initializes the flat-file stores and serves the product lookup API.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use estoque_sync::credentials::CredentialStore;
use estoque_sync::ledger::LedgerStore;
use estoque_sync::movements::MovementLog;
use estoque_sync::products::ProductStore;
use estoque_sync::{DataPaths, SyncBridge};

/// Inventory and ledger backend - product catalog, movement log and
/// finance ledger over flat CSV/JSON files
#[derive(Parser, Debug)]
#[command(name = "estoque_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding produtos.csv, estoque_db.json and database.json
    #[arg(short, long, default_value_t = default_data_dir())]
    data_dir: String,

    /// Port for the product lookup API
    #[arg(long, default_value_t = 5001)]
    web_port: u16,

    /// Initialize the data files and exit
    #[arg(long, default_value_t = false)]
    init_only: bool,
}

/// Returns the default data directory: ~/.local/share/estoque_sync
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("estoque_sync")
        .to_string_lossy()
        .to_string()
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let data_dir = PathBuf::from(&args.data_dir);

    log::info!("Starting estoque_sync...");
    log::info!("Data directory: {}", data_dir.display());

    if !data_dir.exists() {
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            log::error!("Failed to create data directory: {}", e);
            std::process::exit(1);
        }
        log::info!("Created directory: {}", data_dir.display());
    }

    let paths = DataPaths::new(&data_dir);
    let products = ProductStore::new(&paths.products_csv);
    let movements = MovementLog::new(&paths.movements_db);
    let ledger = LedgerStore::new(&paths.ledger_db);
    let credentials = CredentialStore::new(&paths.credentials);

    // First load seeds each missing file with its defaults
    for (name, result) in [
        ("products", products.load().map(|_| ())),
        ("movements", movements.load().map(|_| ())),
        ("ledger", ledger.load().map(|_| ())),
        ("credentials", credentials.init_default()),
    ] {
        if let Err(e) = result {
            log::error!("Failed to initialize {} store: {}", name, e);
            std::process::exit(1);
        }
    }

    let bridge = SyncBridge::new(products.clone(), movements, ledger);
    if let Err(e) = bridge.ensure_ledger_categories() {
        log::error!("Failed to ensure ledger categories: {}", e);
        std::process::exit(1);
    }

    if args.init_only {
        log::info!("Data files initialized, exiting (--init-only)");
        return;
    }

    if let Err(e) = estoque_sync::web::serve(Arc::new(products), args.web_port).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
