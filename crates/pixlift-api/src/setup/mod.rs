//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use pixlift_core::Config;
use pixlift_provider::{PollPolicy, ProviderClient};
use pixlift_services::{CleanupService, EnhancementService};
use pixlift_storage::{LocalStorage, Storage};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded");

    // Setup ephemeral storage
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&config.storage_path)
            .await
            .context("Failed to initialize local storage")?,
    );

    // Provider client and orchestration service
    let provider = ProviderClient::new(
        config.provider_base_url.clone(),
        config.upload_timeout(),
        config.download_timeout(),
    )?;
    let policy = PollPolicy {
        max_attempts: config.poll_max_attempts,
        interval: config.poll_interval(),
        status_timeout: config.status_timeout(),
    };
    let enhancer = EnhancementService::new(provider, storage.clone(), policy);

    // Optional artifact retention sweep
    if let Some(retention) = config.artifact_retention() {
        let cleanup = Arc::new(CleanupService::new(
            &config.storage_path,
            retention,
            config.cleanup_interval(),
        ));
        cleanup.start();
    } else {
        tracing::info!("Artifact retention disabled, storage grows unbounded");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        enhancer,
        storage,
        shutdown: CancellationToken::new(),
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
