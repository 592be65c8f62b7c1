use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::error;

use crate::models::{ErrorResponse, UpdateResponse};
use crate::AppState;

/// Apply a partial update to the shared document and push it to all clients
pub async fn apply_update(
    State(app_state): State<Arc<AppState>>,
    Json(partial): Json<Value>,
) -> Result<(StatusCode, Json<UpdateResponse>), (StatusCode, Json<ErrorResponse>)> {
    match app_state.coordinator.handle_update(&partial) {
        Ok(_) => Ok((
            StatusCode::OK,
            Json(UpdateResponse {
                status: "success".to_string(),
            }),
        )),
        Err(e) => {
            error!("Rejected update request: {}", e);
            let status = StatusCode::BAD_REQUEST;
            Err((
                status,
                Json(ErrorResponse {
                    code: status.as_u16(),
                    status: status.to_string(),
                    error: e.to_string(),
                }),
            ))
        }
    }
}
