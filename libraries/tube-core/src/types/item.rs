/// Queue item types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier extracted from a media link (e.g. an 11-character video id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Display metadata returned by the metadata lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Display title
    pub title: String,
    /// Artwork URL
    pub thumbnail_url: String,
}

/// A single playable queue entry
///
/// Immutable once created. Duplicate ids are allowed and occupy distinct
/// queue slots.
///
/// Older snapshots stored the thumbnail and link under `thumbnail` and `url`;
/// both names are still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Externally resolved identifier passed to the player
    pub id: ItemId,

    /// Title shown in the queue
    #[serde(default)]
    pub title: String,

    /// Artwork URL
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_url: String,

    /// The link the user pasted
    #[serde(default, alias = "url")]
    pub source_url: String,
}

impl Item {
    /// Create an item from its parts
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        thumbnail_url: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail_url: thumbnail_url.into(),
            source_url: source_url.into(),
        }
    }

    /// Build an item from a resolved id and its looked-up metadata
    pub fn from_metadata(id: ItemId, metadata: ItemMetadata, source_url: impl Into<String>) -> Self {
        Self {
            id,
            title: metadata.title,
            thumbnail_url: metadata.thumbnail_url,
            source_url: source_url.into(),
        }
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
