//! Wrapper around the registry management CLI (`az acr` by default)

use super::process::{command_line, CommandRunner};
use crate::config::schema::RegistryConfig;
use crate::error::{SweepError, SweepResult};
use std::sync::Arc;

/// Builds and runs registry tool invocations
pub struct RegistryCli {
    program: String,
    prefix: Vec<String>,
    runner: Arc<dyn CommandRunner>,
}

impl RegistryCli {
    /// Create a wrapper for the configured registry tool
    pub fn new(config: &RegistryConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            program: config.program.clone(),
            prefix: config.prefix.clone(),
            runner,
        }
    }

    /// Run `repository show-manifests` and return its raw stdout
    pub async fn show_manifests(
        &self,
        registry: &str,
        repository: &str,
        on_stderr: &(dyn Fn(String) + Send + Sync),
    ) -> SweepResult<String> {
        let args = self.args(&[
            "repository",
            "show-manifests",
            "--name",
            registry,
            "--repository",
            repository,
        ]);
        self.must_run(&args, on_stderr).await
    }

    /// Run `repository delete` for a single manifest digest
    pub async fn delete_manifest(
        &self,
        registry: &str,
        repository: &str,
        digest: &str,
        on_stderr: &(dyn Fn(String) + Send + Sync),
    ) -> SweepResult<()> {
        let args = self.args(&[
            "repository",
            "delete",
            "-y",
            "--name",
            registry,
            "--repository",
            repository,
            "--manifest",
            digest,
        ]);
        self.must_run(&args, on_stderr).await.map(|_| ())
    }

    fn args(&self, rest: &[&str]) -> Vec<String> {
        self.prefix
            .iter()
            .cloned()
            .chain(rest.iter().map(|s| s.to_string()))
            .collect()
    }

    /// Run to completion; a non-zero exit is an error
    async fn must_run(
        &self,
        args: &[String],
        on_stderr: &(dyn Fn(String) + Send + Sync),
    ) -> SweepResult<String> {
        let output = self.runner.run(&self.program, args, on_stderr).await?;

        if output.success() {
            Ok(output.stdout)
        } else {
            Err(SweepError::ProcessExecution {
                command: command_line(&self.program, args),
                code: output.code.unwrap_or(-1),
            })
        }
    }
}
