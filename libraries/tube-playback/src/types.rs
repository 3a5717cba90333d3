//! Core types for playback management

use serde::{Deserialize, Serialize};
use tube_core::{format_time, Item};

/// Playback state
///
/// `Ended` and `Error` are not resting states: the controller always moves on
/// to `Loading` (next item) or `Idle` (nothing left to play).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded, or loaded/cued but never started
    Idle,

    /// An item was handed to the player and has not started yet
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-item
    Paused,

    /// Item reached its end; autoplay pending
    Ended,

    /// Player reported an error; skip pending
    Error,
}

impl PlaybackState {
    /// Whether the position sampler should be running
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// Why an autoplay-advance was scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoplayReason {
    /// Natural end of the item
    Ended,

    /// Player error, treated as skip-to-next
    Error,
}

/// State and position as last observed from the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub current_time_secs: f64,
    pub duration_secs: f64,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self {
            state: PlaybackState::Idle,
            current_time_secs: 0.0,
            duration_secs: 0.0,
        }
    }
}

/// Everything a presentation layer needs for the "now playing" panel
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub index: usize,
    pub item: Item,
    pub status: PlaybackStatus,
}

impl NowPlaying {
    /// Position as `MM:SS`
    pub fn position_label(&self) -> String {
        format_time(self.status.current_time_secs)
    }

    /// Duration as `MM:SS`
    pub fn duration_label(&self) -> String {
        format_time(self.status.duration_secs)
    }

    /// Window title in the form `▶ <title> — <site>` (`⏸` when not playing)
    pub fn window_title(&self, site_title: &str) -> String {
        let marker = if self.status.state.is_playing() {
            "▶"
        } else {
            "⏸"
        };
        format!("{} {} — {}", marker, self.item.title, site_title)
    }
}
