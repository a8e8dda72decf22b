//! Pseudonymous per-job identity generation.
//!
//! The provider scopes quotas and sessions per username, so every job gets a
//! fresh random identity rather than a real account.

use rand::Rng;

/// Fixed suffix the provider expects on generated usernames.
const USERNAME_SUFFIX: &str = "_aiimglarger";

/// Generate a per-job pseudonymous username: 16 hex characters plus the
/// fixed suffix.
pub fn generate_username() -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..8).map(|_| rng.random()).collect();
    format!("{}{}", hex::encode(random_bytes), USERNAME_SUFFIX)
}
