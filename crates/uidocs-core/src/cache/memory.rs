//! In-process cache tier: bounded LRU behind a coarse lock.
//!
//! The lock is held only for map bookkeeping (entries are cloned out),
//! which is sufficient at this scale; contention is not a concern for a
//! documentation-lookup workload.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use crate::cache::{CacheEntry, CacheKey};

/// Fast tier of the cache store.
pub struct MemoryTier {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
}

impl MemoryTier {
    /// Create a tier holding at most `capacity` entries.
    ///
    /// A zero capacity is clamped to one rather than rejected.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up an entry, refreshing its LRU position on hit.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.get(key).cloned()
    }

    /// Insert or refresh an entry, evicting the LRU victim at capacity.
    ///
    /// Eviction here never touches the persistent tier.
    pub fn put(&self, entry: CacheEntry) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.put(entry.key.clone(), entry);
    }

    /// Drop a single entry, if present.
    pub fn remove(&self, key: &CacheKey) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.pop(key);
    }

    /// Number of currently held entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.len()
    }

    /// Whether the tier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.clear();
    }
}
