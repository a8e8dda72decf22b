//! Wire types for the enhancement provider API.
//!
//! Field names (including the `scaleRadio` spelling) are the provider's own;
//! they are mapped to conventional Rust names via serde renames.

use pixlift_core::EnhanceOptions;
use serde::{Deserialize, Serialize};

/// A submitted enhancement job, referenced by the provider-assigned code
/// during polling. One job per incoming request.
#[derive(Debug, Clone)]
pub struct EnhancementJob {
    /// Opaque identifier assigned by the provider at upload.
    pub code: String,
    /// Pseudonymous per-job identity presented to the provider.
    pub username: String,
    pub options: EnhanceOptions,
}

/// Terminal or in-flight state reported by a status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Success { download_urls: Vec<String> },
    Error,
    /// Any status string other than `success`/`error` is treated as still
    /// in flight; the raw value is kept for logging.
    Pending { raw: String },
}

// POST /Upload response: {"data": {"code": ...}}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub data: UploadData,
}

#[derive(Debug, Deserialize)]
pub struct UploadData {
    pub code: String,
}

// POST /CheckStatus request: {code, type, username, scaleRadio}

#[derive(Debug, Serialize)]
pub struct StatusRequest<'a> {
    pub code: &'a str,
    #[serde(rename = "type")]
    pub enhance_type: u32,
    pub username: &'a str,
    /// Sent as a string, per the provider contract.
    #[serde(rename = "scaleRadio")]
    pub scale_radio: String,
}

impl<'a> StatusRequest<'a> {
    pub fn for_job(job: &'a EnhancementJob) -> Self {
        Self {
            code: &job.code,
            enhance_type: job.options.enhance_type,
            username: &job.username,
            scale_radio: job.options.scale_ratio.to_string(),
        }
    }
}

// POST /CheckStatus response: {"data": {"status": .., "downloadUrls": [..]}}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub data: StatusData,
}

#[derive(Debug, Deserialize)]
pub struct StatusData {
    pub status: String,
    #[serde(default, rename = "downloadUrls")]
    pub download_urls: Vec<String>,
}

impl StatusData {
    pub fn into_status(self) -> JobStatus {
        match self.status.as_str() {
            "success" => JobStatus::Success {
                download_urls: self.download_urls,
            },
            "error" => JobStatus::Error,
            _ => JobStatus::Pending { raw: self.status },
        }
    }
}
