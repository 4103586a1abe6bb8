//! Idempotency key generation.
//!
//! Every mutating request attempt gets its own key. Keys are never reused for
//! retries; a manually repeated action is a distinct idempotent unit.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Produces idempotency keys.
pub trait IdempotencyKeySource: Send + Sync {
    fn next_key(&self) -> String;
}

/// Built-in key generation strategies.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KeyStrategy {
    /// Random 128-bit UUID v4.
    #[default]
    Uuid,
    /// High-resolution timestamp plus a random hex suffix.
    TimestampRandom,
}

impl KeyStrategy {
    pub fn generate(&self) -> String {
        match self {
            Self::Uuid => Uuid::new_v4().to_string(),
            Self::TimestampRandom => timestamp_key(),
        }
    }
}

impl IdempotencyKeySource for KeyStrategy {
    fn next_key(&self) -> String {
        self.generate()
    }
}

fn timestamp_key() -> String {
    let now = chrono::Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));
    let suffix: u64 = rand::thread_rng().r#gen();
    format!("{}-{:x}", nanos, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_keys_are_distinct() {
        let keys: HashSet<String> = (0..1_000).map(|_| KeyStrategy::Uuid.next_key()).collect();
        assert_eq!(keys.len(), 1_000);
    }

    #[test]
    fn test_timestamp_keys_are_distinct() {
        let keys: HashSet<String> = (0..1_000)
            .map(|_| KeyStrategy::TimestampRandom.next_key())
            .collect();
        assert_eq!(keys.len(), 1_000);
    }

    #[test]
    fn test_uuid_key_format() {
        let key = KeyStrategy::Uuid.generate();
        assert!(Uuid::parse_str(&key).is_ok());
    }

    #[test]
    fn test_timestamp_key_format() {
        let key = KeyStrategy::TimestampRandom.generate();
        let (ts, suffix) = key.split_once('-').unwrap();
        assert!(ts.parse::<i64>().is_ok());
        assert!(u64::from_str_radix(suffix, 16).is_ok());
    }
}
