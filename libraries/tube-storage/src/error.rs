/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored value failed shape validation
    #[error("Corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a corrupt value error
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<StorageError> for tube_core::TubeError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Corrupt { key, .. } => tube_core::TubeError::PersistenceReadCorrupt { key },
            other => tube_core::TubeError::storage(other.to_string()),
        }
    }
}
