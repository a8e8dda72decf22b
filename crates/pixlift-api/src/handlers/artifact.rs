//! Artifact retrieval route: serves a previously enhanced image by filename
//! from ephemeral storage.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use pixlift_core::constants::ARTIFACT_PREFIX;
use pixlift_core::AppError;
use pixlift_storage::{Storage, StorageError};

/// Serve an enhanced artifact by filename. Only filenames carrying the
/// artifact prefix resolve; anything else is a 404, same as a missing file.
#[utoipa::path(
    get,
    path = "/{filename}",
    tag = "enhance",
    params(
        ("filename" = String, Path, description = "Artifact filename (enhanced_...)")
    ),
    responses(
        (status = 200, description = "Artifact bytes"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_artifact"))]
pub async fn get_artifact(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    if !filename.starts_with(ARTIFACT_PREFIX) {
        return Err(HttpAppError::from(AppError::NotFound(
            "File not found".to_string(),
        )));
    }

    let stream = state
        .storage
        .read_stream(&filename)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(_) | StorageError::InvalidKey(_) => {
                AppError::NotFound("File not found".to_string())
            }
            other => {
                tracing::error!(error = %other, filename = %filename, "Failed to open artifact");
                AppError::Storage(other.to_string())
            }
        })?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&filename))
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}

/// Content type by artifact extension. Artifacts are currently always JPEG,
/// but the match keeps serving correct if that ever widens.
fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
