//! Domain models shared between the orchestration service and the API layer.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENHANCE_TYPE, DEFAULT_SCALE_RATIO};

/// Per-request enhancement options, parsed from optional form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceOptions {
    pub scale_ratio: u32,
    pub enhance_type: u32,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            scale_ratio: DEFAULT_SCALE_RATIO,
            enhance_type: DEFAULT_ENHANCE_TYPE,
        }
    }
}

impl EnhanceOptions {
    /// Parse options from optional form-field text. Absent or unparsable
    /// values fall back to the defaults rather than erroring.
    pub fn from_fields(scale_ratio: Option<&str>, enhance_type: Option<&str>) -> Self {
        Self {
            scale_ratio: scale_ratio
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_SCALE_RATIO),
            enhance_type: enhance_type
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_ENHANCE_TYPE),
        }
    }
}

/// A completed enhancement, persisted to local storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedArtifact {
    /// Download URL on the provider side, as returned by the status call.
    pub remote_url: String,
    /// Unique local filename (carries the artifact prefix).
    pub filename: String,
    /// Externally reachable URL for the stored artifact.
    pub local_url: String,
}
