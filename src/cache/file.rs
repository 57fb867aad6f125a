//! File-backed cache with TTL support

use super::{CacheEntry, CacheStore};
use crate::config::{Config, ConfigManager};
use crate::error::{SweepError, SweepResult};
use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// Cache that keeps one JSON file per key
///
/// File names are the SHA-256 of the key, so registry names never need
/// escaping. The original key is kept inside the entry for listing.
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    /// Open (and create if needed) a cache directory
    pub async fn new(cache_dir: PathBuf) -> SweepResult<Self> {
        fs::create_dir_all(&cache_dir).await.map_err(|e| {
            SweepError::cache(format!("creating cache dir {}", cache_dir.display()), e)
        })?;

        Ok(Self { cache_dir })
    }

    /// Open the cache directory named by the config, or the default one
    pub async fn from_config(config: &Config) -> SweepResult<Self> {
        let dir = config
            .cache
            .dir
            .clone()
            .unwrap_or_else(ConfigManager::cache_dir);
        Self::new(dir).await
    }

    /// Directory the cache files live in
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Remove a cached value
    pub async fn remove(&self, key: &str) -> SweepResult<()> {
        let path = self.cache_path(key);
        if path.exists() {
            fs::remove_file(&path).await.map_err(|e| {
                SweepError::cache(format!("removing cache file {}", path.display()), e)
            })?;
        }
        Ok(())
    }

    /// Read every entry in the cache, expired ones included
    pub async fn entries(&self) -> SweepResult<Vec<CacheEntry>> {
        let mut entries = Vec::new();
        for path in self.entry_paths().await? {
            let content = fs::read_to_string(&path).await.map_err(|e| {
                SweepError::cache(format!("reading cache file {}", path.display()), e)
            })?;
            let entry: CacheEntry = serde_json::from_str(&content)
                .map_err(|e| SweepError::cache_corrupt(path.display().to_string(), e))?;
            entries.push(entry);
        }
        entries.sort_by(|a: &CacheEntry, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    /// Clear all cached values, returning how many were removed
    pub async fn clear(&self) -> SweepResult<usize> {
        let paths = self.entry_paths().await?;
        for path in &paths {
            fs::remove_file(path)
                .await
                .map_err(|e| SweepError::cache("removing cache file", e))?;
        }
        Ok(paths.len())
    }

    async fn entry_paths(&self) -> SweepResult<Vec<PathBuf>> {
        let mut dir = fs::read_dir(&self.cache_dir)
            .await
            .map_err(|e| SweepError::cache("reading cache directory", e))?;

        let mut paths = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| SweepError::cache("reading cache entry", e))?
        {
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                paths.push(entry.path());
            }
        }
        Ok(paths)
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        let name = hex::encode(Sha256::digest(key.as_bytes()));
        self.cache_dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl CacheStore for FileCache {
    async fn get(&self, key: &str) -> SweepResult<Option<Value>> {
        let path = self.cache_path(key);

        if !path.exists() {
            debug!("Cache miss for {}", key);
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await.map_err(|e| {
            SweepError::cache(format!("reading cache file {}", path.display()), e)
        })?;

        let entry: CacheEntry =
            serde_json::from_str(&content).map_err(|e| SweepError::cache_corrupt(key, e))?;

        if entry.is_expired() {
            debug!("Cached value for {} expired at {}", key, entry.expires_at);
            self.remove(key).await?;
            return Ok(None);
        }

        debug!("Cache hit for {}", key);
        Ok(entry.into_live_value())
    }

    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> SweepResult<()> {
        let path = self.cache_path(key);
        let entry = CacheEntry::new(key, value.clone(), ttl);
        let content = serde_json::to_string_pretty(&entry)?;

        fs::write(&path, content).await.map_err(|e| {
            SweepError::cache(format!("writing cache file {}", path.display()), e)
        })?;

        debug!("Cached {} until {}", key, entry.expires_at);
        Ok(())
    }
}
