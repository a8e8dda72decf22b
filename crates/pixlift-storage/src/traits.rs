//! Storage abstraction trait
//!
//! This module defines the Storage trait the orchestration and API layers
//! work against, decoupled from the filesystem implementation.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// **Key format:** `uploads/{uuid}.{ext}` for spooled uploads,
/// `enhanced_{nanos}_{suffix}.jpg` for artifacts. Keys must not contain `..`
/// or a leading `/`. See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write data under the given storage key
    async fn store(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read a file by its storage key
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Read a file as a stream of chunks (for serving large artifacts)
    async fn read_stream(
        &self,
        key: &str,
    ) -> StorageResult<Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>>;

    /// Delete a file by its storage key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
