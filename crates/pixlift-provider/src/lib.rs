//! Pixlift Provider Library
//!
//! HTTP client for the remote image-enhancement provider: multipart job
//! submission, bounded status polling, and artifact download. The provider is
//! an opaque black box; this crate encodes its wire contract and nothing else.

pub mod client;
pub mod error;
pub mod poll;
pub mod types;
pub mod username;

// Re-export commonly used types
pub use client::ProviderClient;
pub use error::ProviderError;
pub use poll::PollPolicy;
pub use types::{EnhancementJob, JobStatus};
pub use username::generate_username;
