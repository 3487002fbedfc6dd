use crate::medium::StorageMedium;
use jiff::{SignedDuration, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Default namespace prefix, keeping cache entries apart from unrelated
/// data sharing the same medium.
pub const DEFAULT_PREFIX: &str = "waypost_cache_";

/// Wire format of a single cache entry.
#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    value: T,
    /// Absolute expiry as epoch milliseconds.
    expiry: i64,
}

/// A TTL-based cache over a [`StorageMedium`], namespaced by prefix.
///
/// Strictly best-effort: a write that still fails after evicting expired
/// entries is dropped, and a read of a malformed or expired entry evicts it
/// and reports a miss. Nothing here is a source of truth.
///
/// There is no locking beyond the medium's own. The store is built for a
/// single execution context; concurrent writers from other contexts are
/// tolerated as last-write-wins.
#[derive(Debug, Clone)]
pub struct TtlCache<M> {
    medium: M,
    prefix: String,
}

impl<M: StorageMedium> TtlCache<M> {
    /// Creates a cache with the default namespace prefix.
    pub fn new(medium: M) -> Self {
        Self::with_prefix(medium, DEFAULT_PREFIX)
    }

    /// Creates a cache with a custom namespace prefix, for isolated
    /// instances sharing one medium.
    pub fn with_prefix(medium: M, prefix: impl Into<String>) -> Self {
        Self {
            medium,
            prefix: prefix.into(),
        }
    }

    /// Stores a value that expires `ttl` from now.
    ///
    /// A non-positive `ttl` produces an already-expired entry. On write
    /// failure the store evicts expired entries and retries once; a second
    /// failure drops the write.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: SignedDuration) {
        let entry = CacheEntry {
            value,
            expiry: Timestamp::now().as_millisecond() + ttl.as_millis() as i64,
        };

        let encoded = match serde_json::to_string(&entry) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key, error = %e, "failed to encode cache entry, dropping write");
                return;
            }
        };

        let storage_key = self.storage_key(key);
        if let Err(e) = self.medium.set(&storage_key, &encoded) {
            debug!(key, error = %e, "cache write failed, evicting expired entries");
            self.cleanup();
            if let Err(e) = self.medium.set(&storage_key, &encoded) {
                warn!(key, error = %e, "cache write failed after cleanup, dropping write");
            }
        }
    }

    /// Returns the cached value, or `None` when the key is absent, the
    /// entry has expired, or the stored bytes cannot be decoded. Expired
    /// and malformed entries are evicted on the way out.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let storage_key = self.storage_key(key);
        let encoded = self.medium.get(&storage_key)?;

        let entry: CacheEntry<T> = match serde_json::from_str(&encoded) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "evicting malformed cache entry");
                self.medium.remove(&storage_key);
                return None;
            }
        };

        if Timestamp::now().as_millisecond() > entry.expiry {
            trace!(key, "evicting expired cache entry");
            self.medium.remove(&storage_key);
            return None;
        }

        Some(entry.value)
    }

    /// Removes a single entry.
    pub fn remove(&self, key: &str) {
        self.medium.remove(&self.storage_key(key));
    }

    /// Removes every entry under this cache's prefix.
    pub fn clear(&self) {
        for key in self.namespaced_keys() {
            self.medium.remove(&key);
        }
    }

    /// Evicts expired entries under this cache's prefix.
    ///
    /// Run opportunistically on write pressure, not on a timer. Entries
    /// that cannot be decoded are left alone here; reads evict those.
    pub fn cleanup(&self) {
        let now = Timestamp::now().as_millisecond();

        for key in self.namespaced_keys() {
            let Some(encoded) = self.medium.get(&key) else {
                continue;
            };
            if let Ok(entry) = serde_json::from_str::<CacheEntry<serde_json::Value>>(&encoded) {
                if now > entry.expiry {
                    self.medium.remove(&key);
                }
            }
        }
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn namespaced_keys(&self) -> Vec<String> {
        self.medium
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix))
            .collect()
    }
}
