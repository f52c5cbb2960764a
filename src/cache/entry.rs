//! Cache Entry Module
//!
//! Defines the structure of individual cache entries. Entries are immutable
//! once written; a refresh replaces the whole entry rather than mutating it.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A computed result plus its creation timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached payload, opaque to the store
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            created_at: current_timestamp_ms(),
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within its TTL.
    ///
    /// Boundary condition: an entry is valid iff `now - created_at < ttl`.
    /// Once the full TTL has elapsed the entry behaves as absent.
    pub fn is_fresh(&self, ttl_seconds: u64) -> bool {
        let age_ms = current_timestamp_ms().saturating_sub(self.created_at);
        age_ms < ttl_seconds * 1000
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
