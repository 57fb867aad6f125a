//! Manifest listing, classification and cleanup
//!
//! A manifest with no tags is orphaned and a deletion candidate; any tag
//! at all makes it tagged.

mod cleaner;
mod fetcher;

pub use cleaner::{CleanSummary, ManifestCleaner};
pub use fetcher::ManifestFetcher;

use serde::{Deserialize, Deserializer, Serialize};

/// One manifest from a repository listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Content-addressable digest, e.g. `sha256:...`
    pub digest: String,

    /// Tags pointing at this manifest, in listing order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Manifest {
    /// Whether no tag points at this manifest
    pub fn is_orphaned(&self) -> bool {
        self.tags.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
