//! Shared constants for routes, storage keys, and request defaults.

/// Prefix carried by every enhanced artifact filename. The retrieval route
/// only serves files with this prefix.
pub const ARTIFACT_PREFIX: &str = "enhanced_";

/// Storage sub-directory for spooled incoming uploads.
pub const UPLOAD_DIR: &str = "uploads";

/// Multipart form field carrying the image bytes.
pub const IMAGE_FIELD: &str = "image";

/// Multipart form field for the upscale factor.
pub const SCALE_RATIO_FIELD: &str = "scaleRatio";

/// Multipart form field selecting the enhancement mode.
pub const TYPE_FIELD: &str = "type";

/// Default upscale factor when the form field is absent or unparsable.
pub const DEFAULT_SCALE_RATIO: u32 = 4;

/// Default enhancement mode when the form field is absent or unparsable.
pub const DEFAULT_ENHANCE_TYPE: u32 = 0;
