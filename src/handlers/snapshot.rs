use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use crate::models::SnapshotResponse;
use crate::AppState;

/// Read-only snapshot of the shared document for polling clients
pub async fn data_snapshot(State(app_state): State<Arc<AppState>>) -> Json<SnapshotResponse> {
    debug!("Snapshot requested");
    let doc = app_state.coordinator.snapshot();
    Json(SnapshotResponse {
        text: doc.text,
        image: doc.image,
        files: doc.files,
        users: app_state.coordinator.user_count(),
    })
}
