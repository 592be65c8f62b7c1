use utoipa::OpenApi;

use crate::models::*;

/// Read the current shared document
#[utoipa::path(
    get,
    path = "/api/data",
    responses(
        (status = 200, description = "Current document and participant count", body = SnapshotResponse)
    )
)]
#[allow(dead_code)]
pub async fn data_snapshot_doc() {}

/// Apply a partial update to the shared document
#[utoipa::path(
    post,
    path = "/api/update",
    responses(
        (status = 200, description = "Update accepted and broadcast", body = UpdateResponse),
        (status = 400, description = "Malformed update payload", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn apply_update_doc() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Diagnostics endpoint
#[utoipa::path(
    get,
    path = "/api/diagnostics",
    responses(
        (status = 200, description = "Session count and resource usage", body = DiagnosticsResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        data_snapshot_doc,
        apply_update_doc,
        health_check_doc,
        ready_check_doc,
        diagnostics_doc,
    ),
    components(
        schemas(
            SnapshotResponse,
            UpdateResponse,
            HealthResponse,
            ReadyResponse,
            DiagnosticsResponse,
            ErrorResponse,
            SharedDocument
        )
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
