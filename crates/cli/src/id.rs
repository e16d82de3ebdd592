//! Short record id generation
//!
//! Ids are a two-letter prefix followed by six hex characters taken from a
//! SHA-256 of the record name and a random nonce. Callers check each
//! candidate against the store and ask for another on collision.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Candidates offered before giving up
const MAX_ATTEMPTS: usize = 16;

/// Hex characters after the prefix
const HASH_LEN: usize = 6;

/// Prefix for work center ids
pub const WORK_CENTER_PREFIX: &str = "wc";

/// Prefix for work order ids
pub const WORK_ORDER_PREFIX: &str = "wo";

/// Yields candidate ids for one record until the attempt budget runs out
pub struct IdGenerator {
    prefix: &'static str,
    seed: String,
    attempts: usize,
}

impl IdGenerator {
    pub fn new(prefix: &'static str, seed: &str) -> Self {
        Self {
            prefix,
            seed: seed.to_string(),
            attempts: 0,
        }
    }

    /// Next candidate id, or `None` once `MAX_ATTEMPTS` have been handed out.
    pub fn next_id(&mut self) -> Option<String> {
        if self.attempts >= MAX_ATTEMPTS {
            return None;
        }
        self.attempts += 1;

        let nonce: u64 = rand::rng().random();
        let mut hasher = Sha256::new();
        hasher.update(self.seed.as_bytes());
        hasher.update(nonce.to_le_bytes());
        let digest = hasher.finalize();

        let hex: String = digest
            .iter()
            .take(HASH_LEN / 2)
            .map(|b| format!("{:02x}", b))
            .collect();
        Some(format!("{}{}", self.prefix, hex))
    }
}
