//! Cache-fronted manifest listing

use super::Manifest;
use crate::cache::{manifest_cache_key, CacheStore};
use crate::error::{SweepError, SweepResult};
use crate::registry::RegistryCli;
use crate::ui::OutputSink;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Produces the manifest list for a registry/repository pair
pub struct ManifestFetcher<'a> {
    cli: &'a RegistryCli,
    cache: &'a dyn CacheStore,
    sink: &'a dyn OutputSink,
    refresh: bool,
}

impl<'a> ManifestFetcher<'a> {
    pub fn new(cli: &'a RegistryCli, cache: &'a dyn CacheStore, sink: &'a dyn OutputSink) -> Self {
        Self {
            cli,
            cache,
            sink,
            refresh: false,
        }
    }

    /// Skip the cache read; the fresh listing is still cached
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// List manifests, serving from cache when a live entry exists.
    ///
    /// On a miss the registry tool is run with no timeout and its stderr is
    /// forwarded to the sink line by line. Output that is not a JSON
    /// manifest list fails with [`SweepError::FetchParse`] and nothing is
    /// cached.
    pub async fn fetch(
        &self,
        registry: &str,
        repository: &str,
        ttl: Duration,
    ) -> SweepResult<Vec<Manifest>> {
        let key = manifest_cache_key(registry, repository);

        if self.refresh {
            debug!("Refresh requested, ignoring cached {}", key);
        } else if let Some(cached) = self.cache.get(&key).await? {
            debug!("Using cached manifest listing {}", key);
            return serde_json::from_value(cached).map_err(|e| SweepError::cache_corrupt(key, e));
        }

        let forward = |line: String| self.sink.forward(&line);
        let output = self
            .cli
            .show_manifests(registry, repository, &forward)
            .await?;

        let (value, manifests) = decode_listing(&output)?;
        self.cache.set(&key, &value, ttl).await?;

        Ok(manifests)
    }
}

/// Decode the tool's stdout, keeping the raw value for the cache
fn decode_listing(output: &str) -> SweepResult<(Value, Vec<Manifest>)> {
    let parse_error = || SweepError::FetchParse {
        output: output.to_string(),
    };

    let value: Value = serde_json::from_str(output).map_err(|_| parse_error())?;
    if value.is_null() {
        return Err(parse_error());
    }

    let manifests = serde_json::from_value(value.clone()).map_err(|_| parse_error())?;
    Ok((value, manifests))
}
