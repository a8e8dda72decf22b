//! Polling cadence configuration.

use std::time::Duration;

/// Polling policy for status checks: fixed cadence, no backoff or jitter.
#[derive(Clone, Debug)]
pub struct PollPolicy {
    /// Maximum number of status calls before giving up.
    pub max_attempts: u32,
    /// Delay between attempts.
    pub interval: Duration,
    /// Timeout applied to each individual status call.
    pub status_timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval: Duration::from_secs(1),
            status_timeout: Duration::from_secs(10),
        }
    }
}
