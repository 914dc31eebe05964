//! Two-tier cache for fetch results.
//!
//! The fast tier is a bounded in-process LRU; the persistent tier is one
//! JSON file per key and survives restarts. Reads promote persistent hits
//! into the fast tier. A fixed TTL bounds freshness on both tiers; stale
//! entries are deleted lazily at read time or by the periodic sweep and
//! are never served.
//!
//! The cache is strictly an optimization: every read/write fault degrades
//! to a miss or no-op and is never surfaced to the caller.

mod disk;
mod memory;
mod types;

pub use disk::DiskTier;
pub use memory::MemoryTier;
pub use types::{CacheEntry, CacheKey};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tracing::{debug, warn};

use crate::types::{FetchResult, SourceStrategy};

/// Two-tier cache store with time-bounded validity.
///
/// Owns all entry lifetime; no other component retains entries past a
/// single request. Safe for concurrent `get`/`put` from multiple in-flight
/// requests (the fast tier uses a coarse lock, the persistent tier relies
/// on atomic file replacement).
pub struct CacheStore {
    memory: MemoryTier,
    disk: DiskTier,
    ttl: Duration,
}

impl CacheStore {
    /// Create a store rooted at `root` with the given fast-tier capacity
    /// and entry TTL.
    #[must_use]
    pub fn new(root: impl AsRef<Path>, capacity: usize, ttl: Duration) -> Self {
        Self {
            memory: MemoryTier::new(capacity),
            disk: DiskTier::new(root),
            ttl,
        }
    }

    /// Look up a cached result for a canonical URL.
    ///
    /// Fast tier first; on miss, the persistent tier. A persistent hit
    /// within TTL is promoted into the fast tier. Stale entries are
    /// deleted and reported as absent. Never raises: storage faults are
    /// misses.
    ///
    /// The returned result carries `source_strategy = Cache`.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<FetchResult> {
        let key = CacheKey::from_url(url);

        if let Some(entry) = self.memory.get(&key) {
            if entry.is_stale(self.ttl) {
                debug!("Evicting stale fast-tier entry for {}", url);
                self.memory.remove(&key);
                self.drop_persistent(&key);
            } else {
                debug!("Cache hit (memory) for {}", url);
                return Some(Self::as_cached(entry.payload));
            }
        }

        let entry = self.disk.load(&key)?;
        if entry.is_stale(self.ttl) {
            debug!("Deleting stale persistent entry for {}", url);
            self.drop_persistent(&key);
            return None;
        }

        debug!("Cache hit (disk) for {}; promoting", url);
        let payload = entry.payload.clone();
        self.memory.put(entry);
        Some(Self::as_cached(payload))
    }

    /// Write a result through to both tiers.
    ///
    /// The orchestrator only calls this with successful results; failures
    /// are never cached. Persistent-tier faults are logged and swallowed.
    pub fn put(&self, url: &str, result: &FetchResult) {
        let entry = CacheEntry::new(url.to_string(), result.clone());
        if let Err(e) = self.disk.save(&entry) {
            warn!("Cache write for {} failed; continuing uncached: {}", url, e);
        }
        self.memory.put(entry);
    }

    /// Empty both tiers. Operator-triggered invalidation, not part of the
    /// request hot path.
    pub fn clear(&self) {
        self.memory.clear();
        if let Err(e) = self.disk.clear() {
            warn!("Failed to clear persistent tier: {}", e);
        }
    }

    /// Remove every persistent entry older than TTL. Returns the number
    /// of entries removed.
    pub fn sweep(&self) -> usize {
        let mut removed = 0;
        for entry in self.disk.list() {
            if entry.is_stale(self.ttl) {
                self.memory.remove(&entry.key);
                self.drop_persistent(&entry.key);
                removed += 1;
            }
        }
        if removed > 0 {
            debug!("Sweep removed {} expired cache entries", removed);
        }
        removed
    }

    /// Number of entries currently held by each tier `(memory, disk)`.
    #[must_use]
    pub fn stats(&self) -> (usize, usize) {
        (self.memory.len(), self.disk.count())
    }

    /// Spawn the periodic sweeper task.
    ///
    /// Runs `sweep` on a fixed wall-clock interval, independent of
    /// request traffic. Each expired entry is deleted individually, so no
    /// lock is held longer than a single-file removal.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: StdDuration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so startup
            // does not race a cold cache directory.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.sweep();
                debug!("Periodic cache sweep complete ({} removed)", removed);
            }
        })
    }

    fn as_cached(mut payload: FetchResult) -> FetchResult {
        payload.source_strategy = SourceStrategy::Cache;
        payload
    }

    fn drop_persistent(&self, key: &CacheKey) {
        if let Err(e) = self.disk.delete(key) {
            debug!("Failed to delete stale entry {}: {}", key, e);
        }
    }
}
