//! Configuration module
//!
//! This module provides the application configuration, loaded from
//! environment variables with defaults matching the service's documented
//! behavior. Polling cadence is an explicit structure rather than scattered
//! literals so it can be tuned without behavior surprises.

use std::env;
use std::time::Duration;

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const STORAGE_PATH: &str = "/tmp/pixlift";
const PROVIDER_BASE_URL: &str = "https://photoai.imglarger.com/api/PhoAi";
const UPLOAD_TIMEOUT_SECS: u64 = 30;
const DOWNLOAD_TIMEOUT_SECS: u64 = 30;
const POLL_MAX_ATTEMPTS: u32 = 60;
const POLL_INTERVAL_MS: u64 = 1000;
const STATUS_TIMEOUT_SECS: u64 = 10;
const CLEANUP_INTERVAL_SECS: u64 = 3600;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Base URL used to build artifact links. When unset, links are derived
    /// from the request's Host header.
    pub public_base_url: Option<String>,
    pub storage_path: String,
    pub max_file_size_bytes: usize,
    pub http_concurrency_limit: usize,
    // Provider configuration
    pub provider_base_url: String,
    pub upload_timeout_secs: u64,
    pub download_timeout_secs: u64,
    // Polling configuration
    pub poll_max_attempts: u32,
    pub poll_interval_ms: u64,
    pub status_timeout_secs: u64,
    // Artifact retention configuration. 0 = sweep disabled.
    pub artifact_retention_secs: u64,
    pub cleanup_interval_secs: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let provider_base_url = env::var("PROVIDER_BASE_URL")
            .unwrap_or_else(|_| PROVIDER_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            server_port: env_or("SERVER_PORT", SERVER_PORT),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string()),
            storage_path: env::var("STORAGE_PATH").unwrap_or_else(|_| STORAGE_PATH.to_string()),
            max_file_size_bytes: env_or("MAX_FILE_SIZE_BYTES", MAX_FILE_SIZE_BYTES),
            http_concurrency_limit: env_or("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)
                .max(1),
            provider_base_url,
            upload_timeout_secs: env_or("UPLOAD_TIMEOUT_SECS", UPLOAD_TIMEOUT_SECS),
            download_timeout_secs: env_or("DOWNLOAD_TIMEOUT_SECS", DOWNLOAD_TIMEOUT_SECS),
            poll_max_attempts: env_or("POLL_MAX_ATTEMPTS", POLL_MAX_ATTEMPTS).max(1),
            poll_interval_ms: env_or("POLL_INTERVAL_MS", POLL_INTERVAL_MS),
            status_timeout_secs: env_or("STATUS_TIMEOUT_SECS", STATUS_TIMEOUT_SECS),
            artifact_retention_secs: env_or("ARTIFACT_RETENTION_SECS", 0),
            cleanup_interval_secs: env_or("CLEANUP_INTERVAL_SECS", CLEANUP_INTERVAL_SECS),
        })
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }

    pub fn artifact_retention(&self) -> Option<Duration> {
        if self.artifact_retention_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.artifact_retention_secs))
        }
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: SERVER_PORT,
            public_base_url: None,
            storage_path: STORAGE_PATH.to_string(),
            max_file_size_bytes: MAX_FILE_SIZE_BYTES,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            provider_base_url: PROVIDER_BASE_URL.to_string(),
            upload_timeout_secs: UPLOAD_TIMEOUT_SECS,
            download_timeout_secs: DOWNLOAD_TIMEOUT_SECS,
            poll_max_attempts: POLL_MAX_ATTEMPTS,
            poll_interval_ms: POLL_INTERVAL_MS,
            status_timeout_secs: STATUS_TIMEOUT_SECS,
            artifact_retention_secs: 0,
            cleanup_interval_secs: CLEANUP_INTERVAL_SECS,
        }
    }
}
