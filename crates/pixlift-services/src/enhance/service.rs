//! Enhancement orchestration: submit, poll, fetch, persist.
//!
//! Stages run sequentially per request; a single error anywhere aborts the
//! request. The spooled upload is removed on success and on every failure
//! path; its own removal failure is logged, not surfaced.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use pixlift_core::{AppError, EnhanceOptions, EnhancedArtifact};
use pixlift_provider::{PollPolicy, ProviderClient};
use pixlift_storage::{keys, Storage};

/// An incoming upload spooled to ephemeral storage for the duration of one
/// enhancement request.
#[derive(Debug, Clone)]
pub struct TempUpload {
    /// Storage key under the uploads sub-directory.
    pub key: String,
    /// Client-supplied filename, forwarded to the provider.
    pub original_filename: String,
}

/// Orchestrates one enhancement per incoming request. No state is shared
/// between concurrent requests beyond the storage directory itself.
#[derive(Clone)]
pub struct EnhancementService {
    provider: ProviderClient,
    storage: Arc<dyn Storage>,
    policy: PollPolicy,
}

impl EnhancementService {
    pub fn new(provider: ProviderClient, storage: Arc<dyn Storage>, policy: PollPolicy) -> Self {
        Self {
            provider,
            storage,
            policy,
        }
    }

    /// Spool incoming upload bytes to ephemeral storage under a fresh key.
    pub async fn spool_upload(
        &self,
        original_filename: &str,
        data: Vec<u8>,
    ) -> Result<TempUpload, AppError> {
        let key = keys::upload_key(original_filename);
        self.storage
            .store(&key, data)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(TempUpload {
            key,
            original_filename: original_filename.to_string(),
        })
    }

    /// Run the full enhancement flow for a spooled upload. `base_url` is the
    /// externally reachable serving root used to build the artifact link.
    #[tracing::instrument(skip(self, upload, cancel), fields(upload_key = %upload.key))]
    pub async fn enhance(
        &self,
        upload: &TempUpload,
        options: EnhanceOptions,
        base_url: &str,
        cancel: &CancellationToken,
    ) -> Result<EnhancedArtifact, AppError> {
        let result = self.run(upload, options, base_url, cancel).await;

        // Cleanup is attempted regardless of which stage failed.
        if let Err(e) = self.storage.delete(&upload.key).await {
            tracing::warn!(
                error = %e,
                key = %upload.key,
                "Failed to remove spooled upload"
            );
        }

        result
    }

    async fn run(
        &self,
        upload: &TempUpload,
        options: EnhanceOptions,
        base_url: &str,
        cancel: &CancellationToken,
    ) -> Result<EnhancedArtifact, AppError> {
        let data = self
            .storage
            .read(&upload.key)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let job = self
            .provider
            .submit(data, &upload.original_filename, options)
            .await?;

        let download_urls = self.provider.poll(&job, &self.policy, cancel).await?;
        let remote_url = download_urls
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Download("No download URL returned".to_string()))?;

        let artifact_bytes = self.provider.fetch(&remote_url).await?;

        let filename = keys::artifact_filename();
        self.storage
            .store(&filename, artifact_bytes.to_vec())
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let local_url = format!("{}/{}", base_url.trim_end_matches('/'), filename);

        tracing::info!(
            job_code = %job.code,
            filename = %filename,
            remote_url = %remote_url,
            "Enhanced artifact persisted"
        );

        Ok(EnhancedArtifact {
            remote_url,
            filename,
            local_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use pixlift_storage::LocalStorage;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::tempdir;

    /// Mock provider: upload succeeds, first status call is terminal with the
    /// scripted status, artifact download serves fixed bytes.
    async fn start_mock(terminal_status: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let artifact_url = format!("http://{}/artifact.jpg", addr);

        let app = Router::new()
            .route(
                "/Upload",
                post(|| async { Json(json!({"data": {"code": "job-1"}})) }),
            )
            .route(
                "/CheckStatus",
                post(move || {
                    let artifact_url = artifact_url.clone();
                    async move {
                        Json(json!({
                            "data": {
                                "status": terminal_status,
                                "downloadUrls": [artifact_url],
                            }
                        }))
                    }
                }),
            )
            .route("/artifact.jpg", get(|| async { b"enhanced".to_vec() }));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn fast_policy() -> PollPolicy {
        PollPolicy {
            max_attempts: 3,
            interval: Duration::from_millis(10),
            status_timeout: Duration::from_secs(5),
        }
    }

    async fn service_against(base: &str, dir: &std::path::Path) -> EnhancementService {
        let storage = Arc::new(LocalStorage::new(dir).await.unwrap());
        let provider = ProviderClient::new(
            base,
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
        .unwrap();
        EnhancementService::new(provider, storage, fast_policy())
    }

    #[tokio::test]
    async fn test_enhance_persists_artifact_and_removes_temp_upload() {
        let dir = tempdir().unwrap();
        let base = start_mock("success").await;
        let service = service_against(base.as_str(), dir.path()).await;

        let upload = service
            .spool_upload("photo.jpg", b"raw image".to_vec())
            .await
            .unwrap();
        assert!(service.storage.exists(&upload.key).await.unwrap());

        let result = service
            .enhance(
                &upload,
                EnhanceOptions::default(),
                "http://localhost:3000",
                &CancellationToken::new(),
            )
            .await;

        let artifact = result.unwrap();
        assert!(artifact.filename.starts_with("enhanced_"));
        assert_eq!(
            artifact.local_url,
            format!("http://localhost:3000/{}", artifact.filename)
        );
        assert!(service.storage.exists(&artifact.filename).await.unwrap());
        // Spooled upload removed on success.
        assert!(!service.storage.exists(&upload.key).await.unwrap());
    }

    #[tokio::test]
    async fn test_enhance_removes_temp_upload_on_failure() {
        let dir = tempdir().unwrap();
        let base = start_mock("error").await;
        let service = service_against(base.as_str(), dir.path()).await;

        let upload = service
            .spool_upload("photo.jpg", b"raw image".to_vec())
            .await
            .unwrap();

        let result = service
            .enhance(
                &upload,
                EnhanceOptions::default(),
                "http://localhost:3000",
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(result, Err(AppError::EnhancementFailed(_))));
        // Spooled upload removed on the failure path as well.
        assert!(!service.storage.exists(&upload.key).await.unwrap());
    }
}
