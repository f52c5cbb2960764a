//! File Cache Backend
//!
//! Persistent store keeping one JSON file per key. Freshness is derived from
//! the file's modification time rather than a stored timestamp, so entries
//! survive process restarts and are re-validated on first access.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheBackend, CacheStats};
use crate::error::CacheError;

// == File Cache ==
/// Durable cache backend, one file per key.
#[derive(Debug)]
pub struct FileCache {
    /// Directory holding the per-key JSON files
    dir: PathBuf,
    /// Shared TTL in seconds applied to every entry
    ttl: u64,
    /// Performance counters (in-memory, reset on restart)
    stats: CacheStats,
}

impl FileCache {
    // == Constructor ==
    /// Creates a backend rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>, ttl_seconds: u64) -> Self {
        Self {
            dir: dir.into(),
            ttl: ttl_seconds,
            stats: CacheStats::new(),
        }
    }

    /// Maps a cache key to its backing file.
    ///
    /// Keys may contain characters that are unsafe in filenames (the
    /// `common_words_by_title:18` form); anything outside `[A-Za-z0-9_-]`
    /// becomes an underscore.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    /// True when the file's mtime is within the TTL window.
    fn is_fresh(&self, path: &Path) -> bool {
        let Ok(metadata) = fs::metadata(path) else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };
        match SystemTime::now().duration_since(modified) {
            Ok(age) => age.as_secs() < self.ttl,
            // Clock skew: treat a future mtime as fresh
            Err(_) => true,
        }
    }

    fn entry_count(&self) -> usize {
        fs::read_dir(&self.dir)
            .map(|entries| entries.filter_map(|e| e.ok()).count())
            .unwrap_or(0)
    }
}

impl CacheBackend for FileCache {
    fn get(&mut self, key: &str) -> Option<Value> {
        let path = self.path_for(key);
        if !self.is_fresh(&path) {
            self.stats.record_miss();
            return None;
        }

        // Read failures behave as a miss; the caller recomputes.
        match fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                debug!(key, "cache file unreadable, treating as miss");
                self.stats.record_miss();
                None
            }
        }
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let bytes = serde_json::to_vec(&value)?;
        fs::write(self.path_for(key), bytes)?;
        self.stats.set_total_entries(self.entry_count());
        Ok(())
    }

    fn purge_expired(&mut self) -> usize {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return 0;
        };

        let mut removed = 0;
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") && !self.is_fresh(&path) {
                if fs::remove_file(&path).is_ok() {
                    removed += 1;
                }
            }
        }
        self.stats.set_total_entries(self.entry_count());
        removed
    }

    fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entry_count());
        stats
    }
}
