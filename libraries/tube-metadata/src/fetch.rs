//! Link to item resolution
//!
//! The only await in the add flow. Nothing here touches the queue; callers
//! append the returned item unconditionally once it resolves, so the queue
//! is free to change shape while the lookup is in flight.

use tracing::{debug, warn};
use tube_core::{resolve_link, Item, MetadataLookup, Result};

/// Resolve `link`, look up its metadata and build the queue item
///
/// # Errors
/// - `TubeError::InvalidLink` if no id can be extracted (no lookup is made)
/// - `TubeError::MetadataLookupFailed` if the lookup fails
pub async fn fetch_item(lookup: &dyn MetadataLookup, link: &str) -> Result<Item> {
    let link = link.trim();
    let id = resolve_link(link).map_err(|e| {
        warn!(link, "Rejected link without an item id");
        e
    })?;

    let metadata = lookup.lookup(&id).await?;
    debug!(id = %id, title = %metadata.title, "Resolved item");

    Ok(Item::from_metadata(id, metadata, link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;
    use tube_core::{ItemId, ItemMetadata, TubeError};

    mock! {
        pub Lookup {}

        #[async_trait]
        impl MetadataLookup for Lookup {
            async fn lookup(&self, id: &ItemId) -> tube_core::Result<ItemMetadata>;
        }
    }

    #[tokio::test]
    async fn builds_item_from_metadata() {
        let mut lookup = MockLookup::new();
        lookup
            .expect_lookup()
            .with(eq(ItemId::new("dQw4w9WgXcQ")))
            .times(1)
            .returning(|_| {
                Ok(ItemMetadata {
                    title: "Never Gonna Give You Up".to_string(),
                    thumbnail_url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
                })
            });

        let item = fetch_item(&lookup, "  https://youtu.be/dQw4w9WgXcQ ").await.unwrap();
        assert_eq!(item.id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(item.title, "Never Gonna Give You Up");
        assert_eq!(item.source_url, "https://youtu.be/dQw4w9WgXcQ");
    }

    #[tokio::test]
    async fn invalid_link_skips_lookup() {
        let mut lookup = MockLookup::new();
        lookup.expect_lookup().times(0);

        let result = fetch_item(&lookup, "https://vimeo.com/1").await;
        assert!(matches!(result, Err(TubeError::InvalidLink(_))));
    }

    #[tokio::test]
    async fn lookup_failure_is_propagated() {
        let mut lookup = MockLookup::new();
        lookup
            .expect_lookup()
            .returning(|id| Err(TubeError::lookup_failed(id.as_str(), "HTTP 404")));

        let err = fetch_item(&lookup, "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(err.is_user_visible());
        assert!(matches!(err, TubeError::MetadataLookupFailed { .. }));
    }
}
