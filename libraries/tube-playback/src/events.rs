//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller records
//! events as it mutates state; the presentation layer drains them.
//! Events are emitted at key points:
//! - State changes (loading/playing/paused/ended/error/idle)
//! - Items handed to the player (load or cue)
//! - Queue and cursor changes
//! - Position updates (every sampler tick)

use crate::types::{AutoplayReason, PlaybackState};
use serde::{Deserialize, Serialize};
use tube_core::ItemId;

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// An item was handed to the player
    ItemLoaded {
        /// Queue index of the item
        index: usize,
        /// ID of the item
        item_id: ItemId,
        /// `true` when cued without starting playback
        cued: bool,
    },

    /// Cursor moved
    CursorChanged {
        /// New cursor index
        index: usize,
    },

    /// Queue changed (items added/removed/reordered/cleared)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Position update (periodic, every sampler tick)
    PositionUpdate {
        /// Current playback position in seconds
        position_secs: f64,
        /// Item duration in seconds
        duration_secs: f64,
    },

    /// Autoplay moved on to another item
    AutoplayAdvanced {
        /// Cursor before the advance
        from: usize,
        /// Cursor after the advance
        to: usize,
        /// What triggered it
        reason: AutoplayReason,
    },

    /// The external player reported an error code (recoverable)
    PlayerError {
        /// Player-specific error code
        code: i32,
    },

    /// Add-panel visibility changed
    UiFlagChanged {
        /// Whether the panel is visible
        visible: bool,
    },

    /// A command could not be applied
    Error {
        /// Error message
        message: String,
    },
}
