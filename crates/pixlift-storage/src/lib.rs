//! Pixlift Storage Library
//!
//! Ephemeral local-filesystem storage for spooled uploads and enhanced
//! artifacts. The directory is a handoff buffer between the remote fetch and
//! client retrieval; nothing here survives a host cleanup of the storage path.
//!
//! # Storage key format
//!
//! - **Spooled uploads**: `uploads/{uuid}.{ext}`
//! - **Enhanced artifacts**: `enhanced_{nanos}_{suffix}.jpg`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so callers stay consistent.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
