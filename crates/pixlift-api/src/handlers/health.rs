//! Health check handlers.

use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - storage directory is reachable.
pub async fn readiness_check(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> impl IntoResponse {
    let storage_ok = tokio::fs::try_exists(&state.config.storage_path)
        .await
        .unwrap_or(false);

    if storage_ok {
        (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ready", "storage": "healthy" })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "not_ready", "storage": "unavailable" })),
        )
    }
}
