//! In-process cache

use super::{CacheEntry, CacheStore};
use crate::error::SweepResult;
use async_trait::async_trait;
use lru::LruCache;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Number of listings kept before the least recently used is evicted
const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => panic!("capacity must be non-zero"),
};

/// Cache that lives only as long as the process
pub struct MemoryCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create an empty cache with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty cache holding at most `capacity` entries
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up the raw entry for a key without touching its recency
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.lock().peek(key).cloned()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> SweepResult<Option<Value>> {
        let mut entries = self.lock();

        let entry = match entries.get(key) {
            Some(entry) => entry.clone(),
            None => return Ok(None),
        };
        if entry.is_expired() {
            entries.pop(key);
            return Ok(None);
        }

        Ok(entry.into_live_value())
    }

    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> SweepResult<()> {
        self.lock().put(key.to_string(), CacheEntry::new(key, value.clone(), ttl));
        Ok(())
    }
}
