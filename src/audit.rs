//! Audit log of manifest deletions
//!
//! Appends JSON lines to `<state dir>/regsweep/audit.log`, one per deletion
//! attempt, so removed digests can be traced after the cached listing has
//! expired.

use crate::config::{schema::Config, ConfigManager};
use chrono::Utc;
use serde_json::json;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Event recorded after a manifest was deleted
pub const MANIFEST_DELETED: &str = "manifest.deleted";

/// Event recorded when the delete command failed
pub const MANIFEST_DELETE_FAILED: &str = "manifest.delete_failed";

/// File-based audit logger that appends JSON lines
pub struct AuditLog {
    enabled: bool,
    path: PathBuf,
}

impl AuditLog {
    /// Create a new audit logger from config
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.general.audit_log,
            path: ConfigManager::audit_log_path(),
        }
    }

    /// Create a logger writing to an explicit path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            enabled: true,
            path,
        }
    }

    /// Create a logger that records nothing
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            path: PathBuf::new(),
        }
    }

    /// Record a deletion attempt for one manifest
    pub async fn manifest_event(
        &self,
        event: &str,
        registry: &str,
        repository: &str,
        digest: &str,
    ) {
        self.log(
            event,
            &json!({
                "registry": registry,
                "repository": repository,
                "digest": digest,
            }),
        )
        .await;
    }

    /// Log an audit event as a JSON line
    ///
    /// IO failures are logged as warnings and otherwise ignored.
    pub async fn log(&self, event: &str, data: &serde_json::Value) {
        if !self.enabled {
            return;
        }

        let entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event": event,
            "data": data,
        });

        let mut line = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize audit event: {}", e);
                return;
            }
        };
        line.push('\n');

        if let Err(e) = self.append(&line).await {
            warn!("Failed to write audit log {}: {}", self.path.display(), e);
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
