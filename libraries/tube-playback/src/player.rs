//! External media player capability
//!
//! The embedded player is a black box. The player bridge is the only
//! component that calls into it.

use serde::{Deserialize, Serialize};
use tube_core::ItemId;

/// Commands and queries the external player exposes
///
/// Commands are fire-and-forget: failures come back later as
/// [`PlayerSignal::Error`]. Queries may return garbage (`NaN`, negatives)
/// before media is loaded; the bridge sanitizes them.
pub trait MediaPlayer: Send {
    /// Load `id` and start playing it
    fn load(&mut self, id: &ItemId);

    /// Load `id` without starting playback
    fn cue(&mut self, id: &ItemId);

    /// Start or resume the loaded item
    fn play(&mut self);

    /// Pause the loaded item
    fn pause(&mut self);

    /// Stop playback; the item stays loaded
    fn stop(&mut self);

    /// Jump to `seconds` from the start
    fn seek(&mut self, seconds: f64);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Duration of the loaded item in seconds
    fn duration(&self) -> f64;

    /// ID of the item currently loaded, if any
    fn loaded_item_id(&self) -> Option<ItemId>;
}

/// State codes reported by the player's `stateChanged` callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStateCode {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerStateCode {
    /// Map the player's numeric code; unknown codes yield `None`
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Unstarted => -1,
            Self::Ended => 0,
            Self::Playing => 1,
            Self::Paused => 2,
            Self::Buffering => 3,
            Self::Cued => 5,
        }
    }
}

/// Lifecycle callbacks from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSignal {
    /// Player finished initializing and accepts commands
    Ready,

    /// Player state changed
    StateChanged(PlayerStateCode),

    /// Player failed with an implementation-specific code
    Error(i32),
}

impl PlayerSignal {
    /// Build a `StateChanged` signal from a raw code
    pub fn state(code: i32) -> Option<Self> {
        PlayerStateCode::from_code(code).map(Self::StateChanged)
    }
}
