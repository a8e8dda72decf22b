use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use pixlift_core::constants::{IMAGE_FIELD, SCALE_RATIO_FIELD, TYPE_FIELD};
use pixlift_core::{AppError, Config, EnhanceOptions, UploadValidator};

/// Successful enhancement response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub success: bool,
    /// Download URL on the provider side.
    pub original_url: String,
    /// Locally served artifact URL.
    pub local_url: String,
    pub filename: String,
}

/// Enhance image handler
///
/// Accepts a multipart upload, forwards it to the enhancement provider, polls
/// until the job completes, and persists the result for local retrieval.
///
/// # Errors
/// - `AppError::NoFileProvided` - Missing or empty `image` field
/// - `AppError::PayloadTooLarge` - File exceeds size limit
/// - `AppError::Upload` / `EnhancementFailed` / `PollingTimeout` /
///   `Download` / `Storage` - Processing failure (HTTP 500)
#[utoipa::path(
    post,
    path = "/api/enhance",
    tag = "enhance",
    responses(
        (status = 200, description = "Image enhanced successfully", body = EnhanceResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Enhancement failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers, multipart), fields(operation = "enhance_image"))]
pub async fn enhance_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<EnhanceResponse>, HttpAppError> {
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut scale_ratio: Option<String> = None;
    let mut enhance_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            IMAGE_FIELD => {
                let filename = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or("upload.jpg")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read image field: {}", e))
                })?;
                image = Some((filename, data.to_vec()));
            }
            SCALE_RATIO_FIELD => {
                scale_ratio = field.text().await.ok();
            }
            TYPE_FIELD => {
                enhance_type = field.text().await.ok();
            }
            _ => {}
        }
    }

    let (filename, data) = image.ok_or(AppError::NoFileProvided)?;

    let validator = UploadValidator::new(state.config.max_file_size_bytes);
    validator.validate_file_size(data.len())?;

    let options = EnhanceOptions::from_fields(scale_ratio.as_deref(), enhance_type.as_deref());
    let base_url = resolve_base_url(&state.config, &headers);

    tracing::info!(
        filename = %filename,
        size_bytes = data.len(),
        scale_ratio = options.scale_ratio,
        enhance_type = options.enhance_type,
        "Received enhancement request"
    );

    let upload = state.enhancer.spool_upload(&filename, data).await?;

    // Child of the server's shutdown token: graceful shutdown stops polling.
    let cancel = state.shutdown.child_token();
    let artifact = state
        .enhancer
        .enhance(&upload, options, &base_url, &cancel)
        .await?;

    Ok(Json(EnhanceResponse {
        success: true,
        original_url: artifact.remote_url,
        local_url: artifact.local_url,
        filename: artifact.filename,
    }))
}

/// Resolve the base URL for artifact links: configured value when set,
/// otherwise derived from the request's Host header.
fn resolve_base_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(base) = &config.public_base_url {
        return base.clone();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{}", host)
}
