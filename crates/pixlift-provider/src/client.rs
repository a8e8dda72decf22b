//! HTTP client for the enhancement provider.
//!
//! Three operations, mirroring the provider contract: multipart upload,
//! JSON status check, and binary artifact download. Polling is a bounded
//! fixed-cadence loop with an explicit cancellation hook.

use std::time::Duration;

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::{header, multipart, Client};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;
use crate::poll::PollPolicy;
use crate::types::{EnhancementJob, JobStatus, StatusRequest, StatusResponse, UploadResponse};
use crate::username::generate_username;
use pixlift_core::EnhanceOptions;

/// User agent the provider expects; it fingerprints its mobile client.
const USER_AGENT: &str = "Dart/3.5 (dart:io)";

/// The file part is always labeled JPEG regardless of the actual source
/// format; the provider accepts it for every format this service forwards.
const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

/// Client for the remote enhancement provider.
#[derive(Clone, Debug)]
pub struct ProviderClient {
    http: Client,
    base_url: String,
    upload_timeout: Duration,
    download_timeout: Duration,
}

impl ProviderClient {
    pub fn new(
        base_url: impl Into<String>,
        upload_timeout: Duration,
        download_timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to create HTTP client for enhancement provider")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            upload_timeout,
            download_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit image bytes for enhancement. Generates a fresh pseudonymous
    /// username for the job and returns the job handle used for polling.
    pub async fn submit(
        &self,
        data: Vec<u8>,
        filename: &str,
        options: EnhanceOptions,
    ) -> Result<EnhancementJob, ProviderError> {
        let username = generate_username();

        let file_part = multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(UPLOAD_CONTENT_TYPE)
            .map_err(|e| ProviderError::Upload(format!("Failed to build file part: {}", e)))?;

        let form = multipart::Form::new()
            .text("type", options.enhance_type.to_string())
            .text("username", username.clone())
            .text("scaleRadio", options.scale_ratio.to_string())
            .part("file", file_part);

        let response = self
            .http
            .post(format!("{}/Upload", self.base_url))
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT_ENCODING, "gzip")
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Upload(format!("Upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Upload(format!(
                "Upload rejected: {} - {}",
                status, error_text
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Upload(format!("Malformed upload response: {}", e)))?;

        tracing::info!(
            job_code = %body.data.code,
            username = %username,
            scale_ratio = options.scale_ratio,
            enhance_type = options.enhance_type,
            "Enhancement job submitted"
        );

        Ok(EnhancementJob {
            code: body.data.code,
            username,
            options,
        })
    }

    /// Issue a single status check for the job.
    pub async fn check_status(
        &self,
        job: &EnhancementJob,
        timeout: Duration,
    ) -> Result<JobStatus, ProviderError> {
        let response = self
            .http
            .post(format!("{}/CheckStatus", self.base_url))
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT_ENCODING, "gzip")
            .json(&StatusRequest::for_job(job))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                ProviderError::EnhancementFailed(format!("Status check failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::EnhancementFailed(format!(
                "Status check rejected: {} - {}",
                status, error_text
            )));
        }

        let body: StatusResponse = response.json().await.map_err(|e| {
            ProviderError::EnhancementFailed(format!("Malformed status response: {}", e))
        })?;

        Ok(body.data.into_status())
    }

    /// Poll the job to a terminal status. Bounded fixed-cadence loop: early
    /// exit on success or error, no delay after the final attempt. Returns
    /// the artifact download URLs on success.
    pub async fn poll(
        &self,
        job: &EnhancementJob,
        policy: &PollPolicy,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, ProviderError> {
        for attempt in 1..=policy.max_attempts {
            let status = tokio::select! {
                _ = cancel.cancelled() => return Err(ProviderError::Canceled),
                result = self.check_status(job, policy.status_timeout) => result?,
            };

            match status {
                JobStatus::Success { download_urls } => {
                    if download_urls.is_empty() {
                        return Err(ProviderError::EnhancementFailed(
                            "Success status without download URLs".to_string(),
                        ));
                    }
                    tracing::info!(
                        job_code = %job.code,
                        attempts = attempt,
                        "Enhancement job completed"
                    );
                    return Ok(download_urls);
                }
                JobStatus::Error => {
                    return Err(ProviderError::EnhancementFailed(
                        "Provider reported terminal error status".to_string(),
                    ));
                }
                JobStatus::Pending { raw } => {
                    tracing::debug!(
                        job_code = %job.code,
                        attempt,
                        status = %raw,
                        "Waiting for enhancement job"
                    );
                }
            }

            if attempt < policy.max_attempts {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(ProviderError::Canceled),
                    _ = sleep(policy.interval) => {}
                }
            }
        }

        Err(ProviderError::PollingTimeout {
            attempts: policy.max_attempts,
        })
    }

    /// Download the enhanced artifact as a binary payload.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, ProviderError> {
        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .timeout(self.download_timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Download(format!("Download request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Download(format!(
                "Download rejected: {}",
                status
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| ProviderError::Download(format!("Failed to read artifact body: {}", e)))
    }
}
