//! In-Memory Cache Backend
//!
//! HashMap-backed volatile store with lazy TTL expiry. Contents are lost on
//! process restart; average O(1) access with no I/O.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheBackend, CacheEntry, CacheStats};
use crate::error::CacheError;

// == Memory Cache ==
/// Volatile cache backend.
#[derive(Debug)]
pub struct MemoryCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Shared TTL in seconds applied to every entry
    ttl: u64,
    /// Performance counters
    stats: CacheStats,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty store with the given shared TTL.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: ttl_seconds,
            stats: CacheStats::new(),
        }
    }

    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheBackend for MemoryCache {
    fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                // Stale entry: drop it now rather than waiting for the sweep.
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.is_fresh(ttl));
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    fn stats(&self) -> CacheStats {
        self.stats.clone()
    }
}
