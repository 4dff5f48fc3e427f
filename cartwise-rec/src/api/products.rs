//! Product catalog listing

use axum::{extract::State, Json};
use cartwise_common::Product;

use crate::AppState;

/// GET /products
///
/// Returns the full catalog, unfiltered, in catalog order.
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.engine.catalog().all().to_vec())
}
