//! Key-value cache for manifest listings
//!
//! Listings fetched from the registry tool are slow to produce, so the
//! decoded JSON is stored under a key derived from the registry and
//! repository names and reused until its TTL runs out.
//!
//! | Store | Backing | Used by |
//! |-------|---------|---------|
//! | `FileCache` | one JSON file per key in the state dir | the CLI |
//! | `MemoryCache` | in-process LRU | tests, `cache.enabled = false` |

pub mod file;
pub mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use crate::error::SweepResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Longest TTL honoured; larger values are clamped (100 years)
const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Namespace prefix for manifest listing keys
const MANIFEST_KEY_PREFIX: &str = "show-manifest";

/// Characters that are not allowed to reach a cache key verbatim
const RESERVED_KEY_CHARS: [char; 8] = ['{', '}', '(', ')', '/', '\\', '@', ':'];

/// Build the cache key for a registry/repository listing.
///
/// Reserved characters in the repository name are replaced with `_`; the
/// registry name is used as-is.
pub fn manifest_cache_key(registry: &str, repository: &str) -> String {
    let slug: String = repository
        .chars()
        .map(|c| if RESERVED_KEY_CHARS.contains(&c) { '_' } else { c })
        .collect();
    format!("{}.{}.{}", MANIFEST_KEY_PREFIX, registry, slug)
}

/// A stored value with its expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Key the value was stored under
    pub key: String,

    /// The cached value
    pub value: Value,

    /// When the value was stored
    pub stored_at: DateTime<Utc>,

    /// When the value stops being served
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry that expires `ttl` from now
    pub fn new(key: &str, value: Value, ttl: Duration) -> Self {
        let stored_at = Utc::now();
        let secs = ttl.as_secs().min(MAX_TTL_SECS) as i64;
        let expires_at = stored_at + chrono::Duration::seconds(secs);

        Self {
            key: key.to_string(),
            value,
            stored_at,
            expires_at,
        }
    }

    /// Check if the entry has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// The value, unless it is expired or `null`
    fn into_live_value(self) -> Option<Value> {
        if self.is_expired() || self.value.is_null() {
            None
        } else {
            Some(self.value)
        }
    }
}

/// Backing store for cached listings
///
/// Any store with TTL semantics works; failures are surfaced to the caller
/// rather than treated as a miss.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a live value, or `None` if missing, expired or `null`
    async fn get(&self, key: &str) -> SweepResult<Option<Value>>;

    /// Store a value for `ttl`
    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> SweepResult<()>;
}
