//! Classification report and orphan deletion

use super::Manifest;
use crate::audit::{AuditLog, MANIFEST_DELETED, MANIFEST_DELETE_FAILED};
use crate::error::SweepResult;
use crate::registry::RegistryCli;
use crate::ui::OutputSink;
use tracing::debug;

/// Counts from one clean run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanSummary {
    pub tagged: usize,
    pub orphaned: usize,
    pub deleted: usize,
}

/// Reports each manifest and optionally deletes the orphaned ones
pub struct ManifestCleaner<'a> {
    cli: &'a RegistryCli,
    sink: &'a dyn OutputSink,
    audit: &'a AuditLog,
}

impl<'a> ManifestCleaner<'a> {
    pub fn new(cli: &'a RegistryCli, sink: &'a dyn OutputSink, audit: &'a AuditLog) -> Self {
        Self { cli, sink, audit }
    }

    /// Report every manifest in listing order, deleting orphans if asked.
    ///
    /// Deletions run one at a time. The first failed deletion aborts the
    /// run; manifests after it are neither reported nor deleted.
    pub async fn process(
        &self,
        manifests: &[Manifest],
        delete: bool,
        registry: &str,
        repository: &str,
    ) -> SweepResult<CleanSummary> {
        let mut summary = CleanSummary::default();

        for manifest in manifests {
            if !manifest.is_orphaned() {
                self.sink.line(&format!(
                    "Tagged manifest: {} tags: {}",
                    manifest.digest,
                    manifest.tags.join(", ")
                ));
                summary.tagged += 1;
                continue;
            }

            self.sink.line(&format!("Orphaned manifest: {}", manifest.digest));
            summary.orphaned += 1;

            if delete {
                self.sink.line(&format!("Deleting manifest: {}", manifest.digest));
                self.delete_manifest(registry, repository, &manifest.digest)
                    .await?;
                summary.deleted += 1;
            }
        }

        Ok(summary)
    }

    /// Delete one manifest, recording the attempt in the audit log
    pub async fn delete_manifest(
        &self,
        registry: &str,
        repository: &str,
        digest: &str,
    ) -> SweepResult<()> {
        let forward = |line: String| self.sink.forward(&line);
        let result = self
            .cli
            .delete_manifest(registry, repository, digest, &forward)
            .await;

        let event = if result.is_ok() {
            debug!("Deleted manifest {}", digest);
            MANIFEST_DELETED
        } else {
            MANIFEST_DELETE_FAILED
        };
        self.audit
            .manifest_event(event, registry, repository, digest)
            .await;

        result
    }
}
