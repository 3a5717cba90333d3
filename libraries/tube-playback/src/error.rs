//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The external player has not signalled ready yet
    #[error("Player not ready")]
    PlayerNotReady,

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// Link resolution or metadata lookup failed
    #[error(transparent)]
    Core(#[from] tube_core::TubeError),

    /// Persistence medium error
    #[error(transparent)]
    Storage(#[from] tube_storage::StorageError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
