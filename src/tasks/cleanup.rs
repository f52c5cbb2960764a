//! Expired-Entry Cleanup Task
//!
//! Lazy expiry already hides stale entries from readers; this task exists for
//! memory and disk hygiene, periodically dropping entries past their TTL and
//! logging cache counters.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// # Arguments
/// * `cache` - Shared handle to the configured backend
/// * `cleanup_interval_secs` - Interval in seconds between purge runs
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, stats) = {
                let mut cache_guard = cache.write().await;
                (cache_guard.purge_expired(), cache_guard.stats())
            };

            if removed > 0 {
                info!(
                    removed,
                    entries = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    "cache cleanup: purged expired entries"
                );
            } else {
                debug!(entries = stats.total_entries, "cache cleanup: nothing expired");
            }
        }
    })
}
