//! Cache Module
//!
//! Keyed, TTL-governed storage for computed results. Two interchangeable
//! backends: volatile in-memory and persistent one-file-per-key. Expiry is
//! lazy; a stale entry behaves exactly like an absent one.

mod entry;
mod file;
mod memory;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use file::FileCache;
pub use memory::MemoryCache;
pub use stats::CacheStats;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::config::{CacheBackendKind, Config};
use crate::error::CacheError;

// == Cache Backend Trait ==
/// Contract shared by the volatile and persistent backends.
///
/// Callers cannot distinguish "absent" from "expired": both are a miss.
/// Concurrent misses for the same key may each recompute; the last `put` wins.
pub trait CacheBackend: Send + Sync {
    /// Returns the cached value for `key` if present and younger than the TTL.
    fn get(&mut self, key: &str) -> Option<Value>;

    /// Inserts or replaces the entry for `key`, stamped with the current time.
    fn put(&mut self, key: &str, value: Value) -> Result<(), CacheError>;

    /// Removes entries past their TTL. Returns how many were removed.
    ///
    /// Purely memory/disk hygiene: lazy expiry already hides stale entries
    /// from `get`.
    fn purge_expired(&mut self) -> usize;

    /// Returns current hit/miss/entry counters.
    fn stats(&self) -> CacheStats;
}

// == Shared Cache Alias ==
/// Thread-safe handle to the configured backend, shared across in-flight
/// requests.
pub type SharedCache = Arc<RwLock<Box<dyn CacheBackend>>>;

// == Backend Factory ==
/// Builds the backend selected by configuration.
pub fn build_backend(config: &Config) -> Box<dyn CacheBackend> {
    match config.cache_backend {
        CacheBackendKind::Memory => Box::new(MemoryCache::new(config.cache_ttl)),
        CacheBackendKind::File => Box::new(FileCache::new(&config.cache_dir, config.cache_ttl)),
    }
}

/// Wraps a backend in the shared handle used by the orchestrator and the
/// cleanup task.
pub fn shared(backend: Box<dyn CacheBackend>) -> SharedCache {
    Arc::new(RwLock::new(backend))
}
