//! Provider operation errors.

use pixlift_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Enhancement failed: {0}")]
    EnhancementFailed(String),

    #[error("No terminal status after {attempts} polling attempts")]
    PollingTimeout { attempts: u32 },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Canceled")]
    Canceled,
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Upload(msg) => AppError::Upload(msg),
            ProviderError::EnhancementFailed(msg) => AppError::EnhancementFailed(msg),
            ProviderError::PollingTimeout { attempts } => AppError::PollingTimeout { attempts },
            ProviderError::Download(msg) => AppError::Download(msg),
            ProviderError::Canceled => AppError::Canceled,
        }
    }
}
