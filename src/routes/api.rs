use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::handlers::{apply_update, data_snapshot, diagnostics, health_check, ready_check};
use crate::AppState;

/// Create API routes
pub fn create_api_routes(app_state: Arc<AppState>) -> Router {
    // CORS is wide open: polling clients on the local network hit these
    // endpoints from arbitrary origins.
    Router::new()
        .route("/data", get(data_snapshot))
        .route("/update", post(apply_update))
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/diagnostics", get(diagnostics))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
