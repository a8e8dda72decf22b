//! Storage key generation.
//!
//! Centralized so upload spooling and artifact persistence stay consistent
//! with the serving route's expectations.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use uuid::Uuid;

use pixlift_core::constants::{ARTIFACT_PREFIX, UPLOAD_DIR};

/// Generate a unique filename for a completed artifact:
/// `enhanced_{unix_nanos}_{4 hex chars}.jpg`.
///
/// The nanosecond timestamp orders artifacts; the random suffix closes the
/// collision window between near-simultaneous completions.
pub fn artifact_filename() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let suffix: u16 = rand::rng().random();
    format!("{}{}_{:04x}.jpg", ARTIFACT_PREFIX, nanos, suffix)
}

/// Generate a storage key for a spooled upload: `uploads/{uuid}.{ext}`.
/// The extension is taken from the client-supplied filename when present.
pub fn upload_key(original_filename: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) => format!("{}/{}.{}", UPLOAD_DIR, id, ext.to_lowercase()),
        None => format!("{}/{}", UPLOAD_DIR, id),
    }
}
