pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod websocket;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::services::coordinator::UpdateCoordinator;
use crate::services::document_store::DocumentStore;
use crate::services::session_registry::SessionRegistry;

/// Shared state handed to every handler.
pub struct AppState {
    pub coordinator: Arc<UpdateCoordinator>,
}

impl AppState {
    pub fn new() -> Self {
        let store = Arc::new(DocumentStore::new());
        let registry = Arc::new(SessionRegistry::new());
        Self {
            coordinator: Arc::new(UpdateCoordinator::new(store, registry)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the full application router.
pub fn app(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Mount API routes
        .nest("/api", routes::create_api_routes(app_state.clone()))
        // Mount the WebSocket attach point
        .route(
            "/ws",
            get(websocket::handler::websocket_handler).with_state(app_state),
        )
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        // Add tracing layer
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
