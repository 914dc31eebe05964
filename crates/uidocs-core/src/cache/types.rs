//! Type definitions for the fetch cache.

use std::fmt::Write;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::FetchResult;

/// Durable cache key: `pg_<sha256_12>`.
///
/// Derived from the canonical request URL so the same URL always maps to
/// the same key. Twelve hex characters give a 48-bit keyspace, which keeps
/// accidental collisions negligible for the low thousands of pages this
/// cache holds. The key doubles as the on-disk file stem.
///
/// ## Example
///
/// ```rust
/// use uidocs_core::cache::CacheKey;
///
/// let key = CacheKey::from_url("https://ui.shadcn.com/docs/components/button");
/// assert!(key.as_str().starts_with("pg_"));
/// assert_eq!(key.as_str().len(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Create a key from a canonical URL.
    ///
    /// ```rust
    /// use uidocs_core::cache::CacheKey;
    ///
    /// let a = CacheKey::from_url("https://example.com/a");
    /// let b = CacheKey::from_url("https://example.com/a");
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let digest = hasher.finalize();
        // First 6 bytes = 12 hex chars
        let hex = digest.iter().take(6).fold(String::new(), |mut acc, b| {
            let _ = write!(acc, "{b:02x}");
            acc
        });
        Self(format!("pg_{hex}"))
    }

    /// String form including the `pg_` prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted wrapper around a successful [`FetchResult`].
///
/// Serialized camelCase, one JSON file per key on the persistent tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Key derived from `url`.
    pub key: CacheKey,
    /// The canonical URL this entry was fetched for.
    pub url: String,
    /// The cached fetch output.
    pub payload: FetchResult,
    /// When the entry was written.
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Wrap a fetch result for storage, stamping the current time.
    #[must_use]
    pub fn new(url: String, payload: FetchResult) -> Self {
        let key = CacheKey::from_url(&url);
        Self {
            key,
            url,
            payload,
            stored_at: Utc::now(),
        }
    }

    /// Whether the entry's age exceeds `ttl`.
    #[must_use]
    pub fn is_stale(&self, ttl: Duration) -> bool {
        Utc::now() - self.stored_at > ttl
    }
}
