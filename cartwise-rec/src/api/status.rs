//! Liveness and build identification endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// GET /health response
///
/// Besides liveness, reports the size of the data the engine was built
/// from so a bad data directory is visible from outside.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub products: usize,
    pub transactions: usize,
    pub distinct_items: usize,
}

/// GET /api/buildinfo response, captured by build.rs
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    git_hash: env!("GIT_HASH"),
    build_timestamp: env!("BUILD_TIMESTAMP"),
    build_profile: env!("BUILD_PROFILE"),
};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let engine = &state.engine;
    Json(HealthResponse {
        status: "ok",
        module: "cartwise-rec",
        version: BUILD_INFO.version,
        products: engine.catalog().len(),
        transactions: engine.corpus().len(),
        distinct_items: engine.corpus().item_count(),
    })
}

pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BUILD_INFO)
}

/// Routes that never touch the recommendation path
pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/buildinfo", get(get_build_info))
}
