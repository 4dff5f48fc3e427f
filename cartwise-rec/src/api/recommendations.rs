//! Cart-driven recommendations

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use cartwise_common::Product;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::ApiError;
use crate::AppState;

/// Response body for POST /recommendations
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Product>,
    pub frequently_bought_together: Vec<Product>,
}

/// POST /recommendations
///
/// Body: `{"cart_items": ["Milk", "Bread"]}`. A missing `cart_items` is an
/// empty cart. Mining is CPU-bound and runs on the blocking pool.
pub async fn get_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| {
        warn!("Rejected recommendations request: {}", e);
        ApiError::InvalidInput(format!("Invalid JSON body: {}", e.body_text()))
    })?;

    let cart = parse_cart(&body).map_err(|e| {
        warn!("Rejected recommendations request: {}", e);
        e
    })?;
    debug!("Recommending for cart of {} items", cart.len());

    let engine = state.engine.clone();
    let response = tokio::task::spawn_blocking(move || RecommendationsResponse {
        recommendations: engine.recommend(&cart),
        frequently_bought_together: engine.together_with(&cart),
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Recommendation task failed: {}", e)))?;

    Ok(Json(response))
}

/// Extract the cart from a request body
///
/// The body must be a JSON object. `cart_items`, when present, must be an
/// array of strings.
pub fn parse_cart(body: &Value) -> Result<Vec<String>, ApiError> {
    let object = body
        .as_object()
        .ok_or_else(|| ApiError::InvalidInput("Request body must be a JSON object".to_string()))?;

    let Some(items) = object.get("cart_items") else {
        return Ok(Vec::new());
    };

    let not_a_list = || ApiError::InvalidInput("cart_items should be a list of strings".to_string());

    items
        .as_array()
        .ok_or_else(not_a_list)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(not_a_list))
        .collect()
}
