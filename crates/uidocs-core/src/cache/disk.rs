//! Persistent cache tier: one JSON file per key.
//!
//! ## Storage layout
//!
//! ```text
//! <root>/pages/
//!   pg_a1b2c3d4e5f6.json
//!   pg_b2c3d4e5f6a7.json
//! ```
//!
//! Writes are atomic (temp file + rename) so a crash mid-write never
//! leaves a corrupt entry behind. Reads degrade: a missing, unreadable,
//! or unparseable file is reported as absent, never as an error, because
//! the cache is an optimization and must not fail a request.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheKey};
use crate::{Error, Result};

/// Persistent tier of the cache store.
pub struct DiskTier {
    root: PathBuf,
}

impl DiskTier {
    /// Create a tier rooted at the given cache directory.
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn pages_dir(&self) -> PathBuf {
        self.root.join("pages")
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.pages_dir().join(format!("{}.json", key.as_str()))
    }

    /// Load an entry, treating every fault as absence.
    #[must_use]
    pub fn load(&self, key: &CacheKey) -> Option<CacheEntry> {
        let path = self.entry_path(key);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                debug!("Cache read for {} degraded to miss: {}", key, e);
                return None;
            },
        };
        match serde_json::from_str(&json) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Corrupt cache entry {}; treating as miss: {}", key, e);
                None
            },
        }
    }

    /// Save an entry atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write/rename fails. The
    /// caller (the two-tier store) swallows these.
    pub fn save(&self, entry: &CacheEntry) -> Result<()> {
        let pages_dir = self.pages_dir();
        fs::create_dir_all(&pages_dir)
            .map_err(|e| Error::Storage(format!("Failed to create pages directory: {e}")))?;

        let path = self.entry_path(&entry.key);
        let json = serde_json::to_string_pretty(entry)
            .map_err(|e| Error::Storage(format!("Failed to serialize cache entry: {e}")))?;

        // Atomic write: temp file + rename
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| Error::Storage(format!("Failed to write temp cache file: {e}")))?;

        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("Failed to remove existing entry: {e}")))?;
        }

        fs::rename(&tmp_path, &path)
            .map_err(|e| Error::Storage(format!("Failed to commit cache file: {e}")))?;

        debug!("Saved cache entry {} for {}", entry.key, entry.url);
        Ok(())
    }

    /// Delete an entry. Missing files are not an error.
    pub fn delete(&self, key: &CacheKey) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("Failed to delete cache entry {key}: {e}")))?;
            debug!("Deleted cache entry {}", key);
        }
        Ok(())
    }

    /// Iterate all stored entries, skipping unreadable files.
    ///
    /// Used by the sweep; corrupt files are skipped rather than aborting
    /// the pass.
    #[must_use]
    pub fn list(&self) -> Vec<CacheEntry> {
        let pages_dir = self.pages_dir();
        let Ok(entries) = fs::read_dir(&pages_dir) else {
            return Vec::new();
        };

        let mut loaded = Vec::new();
        for entry in entries.filter_map(std::result::Result::ok) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .ok()
                .and_then(|json| serde_json::from_str::<CacheEntry>(&json).ok())
            {
                Some(parsed) => loaded.push(parsed),
                None => debug!("Skipping unreadable cache file {}", path.display()),
            }
        }
        loaded
    }

    /// Number of stored entries, without deserializing them.
    #[must_use]
    pub fn count(&self) -> usize {
        fs::read_dir(self.pages_dir()).map_or(0, |entries| {
            entries
                .filter_map(std::result::Result::ok)
                .filter(|e| {
                    e.path()
                        .extension()
                        .and_then(|s| s.to_str())
                        .is_some_and(|ext| ext == "json")
                })
                .count()
        })
    }

    /// Remove every stored entry.
    pub fn clear(&self) -> Result<()> {
        let pages_dir = self.pages_dir();
        if pages_dir.exists() {
            fs::remove_dir_all(&pages_dir)
                .map_err(|e| Error::Storage(format!("Failed to clear pages directory: {e}")))?;
            debug!("Cleared persistent cache tier");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{FetchResult, SourceStrategy};
    use tempfile::TempDir;

    fn entry_for(url: &str) -> CacheEntry {
        let payload =
            FetchResult::ok(url, "# Test\n\nContent".into(), SourceStrategy::Direct).unwrap();
        CacheEntry::new(url.into(), payload)
    }

    #[test]
    fn save_and_load_entry() {
        let temp = TempDir::new().unwrap();
        let tier = DiskTier::new(temp.path());

        let entry = entry_for("https://ui.shadcn.com/docs/components/button");
        tier.save(&entry).unwrap();

        let loaded = tier.load(&entry.key).unwrap();
        assert_eq!(loaded.url, entry.url);
        assert_eq!(loaded.payload, entry.payload);
    }

    #[test]
    fn load_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let tier = DiskTier::new(temp.path());
        let key = CacheKey::from_url("https://example.com/absent");
        assert!(tier.load(&key).is_none());
    }

    #[test]
    fn corrupt_entry_degrades_to_miss() {
        let temp = TempDir::new().unwrap();
        let tier = DiskTier::new(temp.path());

        let entry = entry_for("https://ui.shadcn.com/docs/cli");
        tier.save(&entry).unwrap();

        let path = temp
            .path()
            .join("pages")
            .join(format!("{}.json", entry.key.as_str()));
        fs::write(&path, "{not json").unwrap();

        assert!(tier.load(&entry.key).is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let tier = DiskTier::new(temp.path());

        let entry = entry_for("https://ui.shadcn.com/docs/cli");
        tier.save(&entry).unwrap();
        tier.delete(&entry.key).unwrap();
        assert!(tier.load(&entry.key).is_none());

        // Second delete of a missing entry succeeds
        tier.delete(&entry.key).unwrap();
    }

    #[test]
    fn list_and_count() {
        let temp = TempDir::new().unwrap();
        let tier = DiskTier::new(temp.path());

        assert_eq!(tier.count(), 0);
        tier.save(&entry_for("https://ui.shadcn.com/docs/cli")).unwrap();
        tier.save(&entry_for("https://ui.shadcn.com/docs/theming")).unwrap();

        assert_eq!(tier.count(), 2);
        assert_eq!(tier.list().len(), 2);
    }

    #[test]
    fn clear_removes_everything() {
        let temp = TempDir::new().unwrap();
        let tier = DiskTier::new(temp.path());

        tier.save(&entry_for("https://ui.shadcn.com/docs/cli")).unwrap();
        tier.clear().unwrap();
        assert_eq!(tier.count(), 0);
    }

    #[test]
    fn atomic_write_leaves_no_tmp_files() {
        let temp = TempDir::new().unwrap();
        let tier = DiskTier::new(temp.path());
        tier.save(&entry_for("https://ui.shadcn.com/docs/cli")).unwrap();

        let tmp_files: Vec<_> = fs::read_dir(temp.path().join("pages"))
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| ext == "tmp")
            })
            .collect();
        assert!(tmp_files.is_empty());
    }
}
