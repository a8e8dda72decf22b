mod service;

pub use service::{EnhancementService, TempUpload};
