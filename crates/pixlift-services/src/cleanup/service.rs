//! Background retention sweep for the ephemeral storage directory.
//!
//! Artifacts (and any spooled uploads orphaned by a crash) older than the
//! retention window are deleted on a fixed interval. Individual deletion
//! failures are logged and do not stop the sweep.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::fs;
use tokio::time::interval;

use pixlift_core::constants::{ARTIFACT_PREFIX, UPLOAD_DIR};

#[derive(Clone)]
pub struct CleanupService {
    storage_path: PathBuf,
    retention: Duration,
    sweep_interval: Duration,
}

impl CleanupService {
    pub fn new(
        storage_path: impl Into<PathBuf>,
        retention: Duration,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            storage_path: storage_path.into(),
            retention,
            sweep_interval,
        }
    }

    /// Start the background sweep task.
    /// Returns a JoinHandle for graceful shutdown.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep = interval(self.sweep_interval);

            tracing::info!(
                storage_path = %self.storage_path.display(),
                retention_secs = self.retention.as_secs(),
                sweep_interval_secs = self.sweep_interval.as_secs(),
                "Artifact cleanup service started"
            );

            loop {
                sweep.tick().await;

                match self.sweep_expired().await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Cleanup completed");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Cleanup sweep failed");
                    }
                }
            }
        })
    }

    /// Delete artifacts and orphaned spooled uploads older than the
    /// retention window. Returns the number of files deleted.
    #[tracing::instrument(skip(self), fields(cleanup.operation = "expire_all"))]
    async fn sweep_expired(&self) -> Result<usize, anyhow::Error> {
        let mut deleted = self
            .sweep_dir(&self.storage_path, Some(ARTIFACT_PREFIX))
            .await?;
        deleted += self
            .sweep_dir(&self.storage_path.join(UPLOAD_DIR), None)
            .await?;
        Ok(deleted)
    }

    /// Sweep one directory, optionally restricted to a filename prefix.
    async fn sweep_dir(
        &self,
        dir: &Path,
        prefix: Option<&str>,
    ) -> Result<usize, anyhow::Error> {
        if !fs::try_exists(dir).await.unwrap_or(false) {
            return Ok(0);
        }

        let mut deleted = 0;
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(prefix) = prefix {
                if !name.starts_with(prefix) {
                    continue;
                }
            }

            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(error = %e, file = %name, "Failed to stat file, skipping");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let age = metadata
                .modified()
                .ok()
                .and_then(|m| SystemTime::now().duration_since(m).ok())
                .unwrap_or_default();
            if age <= self.retention {
                continue;
            }

            match fs::remove_file(entry.path()).await {
                Ok(()) => {
                    tracing::info!(
                        file = %name,
                        age_secs = age.as_secs(),
                        "Deleted expired file"
                    );
                    deleted += 1;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        file = %name,
                        "Failed to delete expired file, continuing"
                    );
                }
            }
        }

        Ok(deleted)
    }
}
