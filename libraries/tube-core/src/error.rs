/// Core error types for Tube Queue
use thiserror::Error;

/// Result type alias using `TubeError`
pub type Result<T> = std::result::Result<T, TubeError>;

/// Core error type for Tube Queue
///
/// None of these are fatal: every path that produces one leaves the queue
/// either unchanged or back in `Idle`.
#[derive(Error, Debug)]
pub enum TubeError {
    /// The pasted link carries no recognizable item id
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// Metadata for a resolved id could not be fetched or parsed
    #[error("Metadata lookup failed for {id}: {reason}")]
    MetadataLookupFailed {
        /// The resolved item id
        id: String,
        /// Transport or parse failure
        reason: String,
    },

    /// The external player reported an error code
    #[error("Player error code {code}")]
    Player {
        /// Player-specific error code
        code: i32,
    },

    /// A stored value failed shape validation
    #[error("Corrupt persisted value under '{key}'")]
    PersistenceReadCorrupt {
        /// Storage key holding the bad value
        key: String,
    },

    /// Persistence medium errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl TubeError {
    /// Create an invalid link error
    pub fn invalid_link(link: impl Into<String>) -> Self {
        Self::InvalidLink(link.into())
    }

    /// Create a metadata lookup error
    pub fn lookup_failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MetadataLookupFailed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether this error should be shown to the user as an alert
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::InvalidLink(_) | Self::MetadataLookupFailed { .. }
        )
    }
}
