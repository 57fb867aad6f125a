//! Configuration schema for regsweep
//!
//! Configuration is stored at `~/.config/regsweep/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// External registry tool settings
    pub registry: RegistryConfig,

    /// Manifest listing cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Record manifest deletions in the audit log
    pub audit_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { audit_log: true }
    }
}

/// External registry tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Program to execute
    pub program: String,

    /// Arguments placed before `repository ...` on every invocation
    pub prefix: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            program: "az".to_string(),
            prefix: vec!["acr".to_string()],
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Persist manifest listings between runs (default: true)
    pub enabled: bool,

    /// Default lifetime of a cached listing in seconds
    pub ttl_secs: u64,

    /// Cache directory override
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 86400,
            dir: None,
        }
    }
}
