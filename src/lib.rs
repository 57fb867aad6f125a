//! regsweep - find and delete orphaned container registry manifests
//!
//! Lists a repository's manifests through the registry's management CLI,
//! caches the listing for a TTL, reports tagged and orphaned manifests and
//! optionally deletes the orphans one by one.

pub mod audit;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{SweepError, SweepResult};
