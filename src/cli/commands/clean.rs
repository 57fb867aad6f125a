//! repository:clean command - report and delete orphaned manifests

use crate::audit::AuditLog;
use crate::cache::{CacheStore, FileCache, MemoryCache};
use crate::cli::args::CleanArgs;
use crate::config::Config;
use crate::error::SweepResult;
use crate::manifest::{ManifestCleaner, ManifestFetcher};
use crate::registry::{RegistryCli, SystemRunner};
use crate::ui::StdoutSink;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Execute the repository:clean command
pub async fn execute(args: CleanArgs, config: &Config) -> SweepResult<()> {
    let cli = RegistryCli::new(&config.registry, Arc::new(SystemRunner));
    let sink = StdoutSink;
    let audit = AuditLog::new(config);

    let cache: Box<dyn CacheStore> = if config.cache.enabled {
        Box::new(FileCache::from_config(config).await?)
    } else {
        debug!("Listing cache disabled in config");
        Box::new(MemoryCache::new())
    };

    let ttl = Duration::from_secs(args.cache_expire_seconds.unwrap_or(config.cache.ttl_secs));

    let manifests = ManifestFetcher::new(&cli, cache.as_ref(), &sink)
        .refresh(args.refresh)
        .fetch(&args.registry, &args.repository, ttl)
        .await?;

    let summary = ManifestCleaner::new(&cli, &sink, &audit)
        .process(&manifests, args.delete, &args.registry, &args.repository)
        .await?;

    info!(
        "{}/{}: {} tagged, {} orphaned, {} deleted",
        args.registry, args.repository, summary.tagged, summary.orphaned, summary.deleted
    );

    Ok(())
}
