//! Pixlift Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! upload validation shared across all pixlift components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{EnhanceOptions, EnhancedArtifact};
pub use validation::{UploadValidator, ValidationError};
