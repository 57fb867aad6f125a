//! Cache command - inspect or clear cached manifest listings

use crate::cache::{CacheEntry, FileCache};
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::SweepResult;
use crate::ui;
use console::style;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> SweepResult<()> {
    let cache = FileCache::from_config(config).await?;

    match args.action {
        CacheAction::List => list_entries(&cache).await,
        CacheAction::Clear => clear_entries(&cache).await,
        CacheAction::Path => {
            println!("{}", cache.dir().display());
            Ok(())
        }
    }
}

async fn list_entries(cache: &FileCache) -> SweepResult<()> {
    let entries = cache.entries().await?;

    if entries.is_empty() {
        ui::step_info("No cached listings");
        return Ok(());
    }

    ui::section("Cached listings");
    println!(
        "{:<50} {:<10} {:<20}",
        style("KEY").bold(),
        style("STATE").bold(),
        style("EXPIRES").bold()
    );
    println!("{}", "-".repeat(80));

    for entry in &entries {
        print_entry(entry);
    }

    println!();
    println!("Total: {} listing(s)", entries.len());
    Ok(())
}

fn print_entry(entry: &CacheEntry) {
    let state = if entry.is_expired() {
        style("expired").dim()
    } else {
        style("live").green()
    };
    let expires = entry.expires_at.format("%Y-%m-%d %H:%M").to_string();

    println!("{:<50} {:<10} {:<20}", entry.key, state, expires);
}

async fn clear_entries(cache: &FileCache) -> SweepResult<()> {
    let removed = cache.clear().await?;
    ui::step_ok_detail(
        &format!("Removed {} cached listing(s)", removed),
        &cache.dir().display().to_string(),
    );
    Ok(())
}
