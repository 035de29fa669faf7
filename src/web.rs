//! Read-only product lookup API
//!
//! Serves the two JSON endpoints the sale and purchase forms use for
//! barcode and name lookups.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::products::ProductStore;

/// Name searches return at most this many products
const SEARCH_LIMIT: usize = 10;

/// Shared application state
#[derive(Clone)]
struct AppState {
    products: Arc<ProductStore>,
}

/// Search query parameters
#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    termo: String,
}

#[derive(Serialize)]
struct ProductResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    produto: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    produtos: Vec<Product>,
}

/// GET /api/produto/{codigo} - look a product up by barcode
async fn product_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<ProductResponse>, StatusCode> {
    match state.products.find(&barcode) {
        Ok(Some(product)) => Ok(Json(ProductResponse {
            success: true,
            produto: Some(product),
            message: None,
        })),
        Ok(None) => Ok(Json(ProductResponse {
            success: false,
            produto: None,
            message: Some("Produto não encontrado".to_string()),
        })),
        Err(e) => {
            log::error!("Product lookup error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/produtos/buscar?termo={termo} - search by name or barcode
async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, StatusCode> {
    match state.products.search(&params.termo) {
        Ok(mut produtos) => {
            produtos.truncate(SEARCH_LIMIT);
            Ok(Json(SearchResponse {
                success: true,
                produtos,
            }))
        }
        Err(e) => {
            log::error!("Product search error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Build the lookup API router
pub fn create_router(products: Arc<ProductStore>) -> Router {
    let state = AppState { products };

    Router::new()
        .route("/api/produto/{codigo}", get(product_handler))
        .route("/api/produtos/buscar", get(search_handler))
        .with_state(state)
}

/// Start the web server (async)
pub async fn serve(
    products: Arc<ProductStore>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let app = create_router(products);
    let addr = format!("127.0.0.1:{}", port);

    log::info!("Lookup API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
