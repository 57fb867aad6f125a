//! Error types for regsweep
//!
//! All modules use `SweepResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for regsweep operations
pub type SweepResult<T> = Result<T, SweepError>;

/// All errors that can occur in regsweep
#[derive(Error, Debug)]
pub enum SweepError {
    // Registry tool errors
    #[error("Failed to get manifests: {output}")]
    FetchParse { output: String },

    #[error("Command failed: {command}, exit code: {code}")]
    ProcessExecution { command: String, code: i32 },

    #[error("Failed to run command: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Cache errors
    #[error("Cache error: {context}")]
    Cache {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt cache entry {entry}: {source}")]
    CacheCorrupt {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SweepError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a cache backend error with context
    pub fn cache(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Cache {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error (the process could not be started)
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a corrupt cache entry error
    pub fn cache_corrupt(entry: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CacheCorrupt {
            entry: entry.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::CommandFailed { command, source }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Some(format!(
                    "Install {} or set registry.program in the config",
                    program_name(command)
                ))
            }
            Self::ProcessExecution { command, .. } => Some(format!(
                "See the {} output above; it may need you to log in first",
                program_name(command)
            )),
            Self::FetchParse { .. } => Some("Run with -vv to see the exact command line".into()),
            Self::Cache { .. } | Self::CacheCorrupt { .. } => {
                Some("Run: regsweep cache clear".into())
            }
            _ => None,
        }
    }
}

/// First word of a rendered command line
fn program_name(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or(command)
}
