//! cartwise-rec library - market-basket recommendation service
//!
//! Mines co-purchase patterns from the purchase history and turns them into
//! cart recommendations and "frequently bought together" bundles.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod engine;

use engine::Engine;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only engine, built once at startup
    pub engine: Arc<Engine>,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/products", get(api::list_products))
        .route("/recommendations", post(api::get_recommendations))
        .merge(api::status_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Storefront is served from a different origin
        .layer(CorsLayer::permissive())
}
