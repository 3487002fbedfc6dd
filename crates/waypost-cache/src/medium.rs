use crate::error::MediumError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// The minimal key-value surface the cache is layered over.
///
/// Modeled on browser storage: string keys, string values, writes that can
/// fail when the medium is full, and key enumeration for prefix scans.
/// Implementations need no internal expiry handling; the cache stores
/// expiries inside the values it writes.
pub trait StorageMedium: Send + Sync + 'static {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value, failing when the medium cannot accept the write
    /// (e.g. a quota is exceeded).
    fn set(&self, key: &str, value: &str) -> Result<(), MediumError>;

    /// Removes a key. Removing an absent key is not an error.
    fn remove(&self, key: &str);

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Vec<String>;
}

/// In-memory [`StorageMedium`] with an optional byte quota.
///
/// The quota counts key and value bytes together, which is enough to
/// exercise the cache's full-storage recovery path in tests. Clones share
/// the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryMedium {
    /// Creates an unbounded in-memory medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a medium that rejects writes once `quota_bytes` of keys and
    /// values are stored.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the medium holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MediumError> {
        let mut entries = self.entries.lock();

        if let Some(quota) = self.quota_bytes {
            let existing = entries.get(key).map_or(0, |v| key.len() + v.len());
            let used = Self::used_bytes(&entries) - existing;
            if used + key.len() + value.len() > quota {
                return Err(MediumError::QuotaExceeded(format!(
                    "{} of {} bytes in use",
                    used, quota
                )));
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }
}
