/// Core traits for Tube Queue
use crate::error::Result;
use crate::types::{ItemId, ItemMetadata};
use async_trait::async_trait;

/// Metadata lookup collaborator
///
/// Resolves an item id into display metadata. Implementations perform
/// network I/O; callers must not hold queue state across the await.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Look up title and artwork for `id`
    ///
    /// # Errors
    /// Returns `TubeError::MetadataLookupFailed` on network or parse failure
    async fn lookup(&self, id: &ItemId) -> Result<ItemMetadata>;
}
