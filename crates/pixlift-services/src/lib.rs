//! Pixlift Services Library
//!
//! Orchestration services built on the provider client and storage crates:
//! the enhancement flow (submit, poll, fetch, persist) and the background
//! artifact retention sweep.

pub mod cleanup;
pub mod enhance;

// Re-export commonly used types
pub use cleanup::CleanupService;
pub use enhance::{EnhancementService, TempUpload};
