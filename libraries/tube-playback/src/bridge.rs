//! Player bridge
//!
//! Owns the single external player instance and its position sampler.
//! Raw player callbacks go through [`PlayerBridge::translate`] and come out as
//! [`BridgeEvent`]s for the controller; queries come back sanitized.

use crate::player::{MediaPlayer, PlayerSignal, PlayerStateCode};
use std::time::Duration;
use tracing::{debug, trace, warn};
use tube_core::{sanitize_seconds, Item, ItemId, TubeError};

/// Player lifecycle event after translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BridgeEvent {
    /// Player accepts commands; `first` is set only for the first `ready`
    Ready { first: bool },
    Unstarted,
    Playing,
    Paused,
    Ended,
    Buffering,
    Cued,
    /// Player failed with the given code
    Error(i32),
}

/// Periodic position sampler, armed only while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sampler {
    interval: Duration,
    next_due: Option<Duration>,
}

/// Adapter between the external player and the controller
pub(crate) struct PlayerBridge<P: MediaPlayer> {
    player: P,
    ready: bool,
    sampler: Sampler,
}

impl<P: MediaPlayer> PlayerBridge<P> {
    /// Wrap `player`; it is not ready until it signals so
    pub fn new(player: P, sample_interval: Duration) -> Self {
        Self {
            player,
            ready: false,
            sampler: Sampler {
                interval: sample_interval,
                next_due: None,
            },
        }
    }

    /// Translate a raw player callback
    pub fn translate(&mut self, signal: PlayerSignal) -> BridgeEvent {
        let event = match signal {
            PlayerSignal::Ready => {
                let first = !self.ready;
                self.ready = true;
                BridgeEvent::Ready { first }
            }
            PlayerSignal::StateChanged(code) => match code {
                PlayerStateCode::Unstarted => BridgeEvent::Unstarted,
                PlayerStateCode::Ended => BridgeEvent::Ended,
                PlayerStateCode::Playing => BridgeEvent::Playing,
                PlayerStateCode::Paused => BridgeEvent::Paused,
                PlayerStateCode::Buffering => BridgeEvent::Buffering,
                PlayerStateCode::Cued => BridgeEvent::Cued,
            },
            PlayerSignal::Error(code) => {
                warn!(error = %TubeError::Player { code }, "Skipping failed item");
                BridgeEvent::Error(code)
            }
        };
        trace!(?signal, ?event, "Translated player signal");
        event
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Load and start `item`
    pub fn load(&mut self, item: &Item) {
        debug!(id = %item.id, title = %item.title, "Loading item");
        self.player.load(&item.id);
    }

    /// Load `item` without playing it
    pub fn cue(&mut self, item: &Item) {
        debug!(id = %item.id, title = %item.title, "Cueing item");
        self.player.cue(&item.id);
    }

    pub fn play(&mut self) {
        self.player.play();
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    pub fn seek(&mut self, seconds: f64) {
        self.player.seek(seconds);
    }

    /// Current position, 0 when the player reports garbage
    pub fn position(&self) -> f64 {
        sanitize_seconds(self.player.current_time())
    }

    /// Duration of the loaded item, 0 when unknown
    pub fn duration(&self) -> f64 {
        sanitize_seconds(self.player.duration())
    }

    pub fn loaded_item_id(&self) -> Option<ItemId> {
        self.player.loaded_item_id()
    }

    /// Arm the sampler; first sample is one interval after `now`
    pub fn start_sampler(&mut self, now: Duration) {
        self.sampler.next_due = Some(now + self.sampler.interval);
    }

    pub fn stop_sampler(&mut self) {
        self.sampler.next_due = None;
    }

    pub fn sampler_deadline(&self) -> Option<Duration> {
        self.sampler.next_due
    }

    /// Read the position for the tick due at `at` and re-arm the sampler
    ///
    /// Returns `None` if the sampler is not running.
    pub fn take_sample(&mut self, at: Duration) -> Option<f64> {
        self.sampler.next_due?;
        self.sampler.next_due = Some(at + self.sampler.interval);
        Some(self.position())
    }

    /// Release the sampler; the bridge must not produce samples afterwards
    pub fn teardown(&mut self) {
        self.stop_sampler();
        self.ready = false;
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }
}

impl<P: MediaPlayer> std::fmt::Debug for PlayerBridge<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerBridge")
            .field("ready", &self.ready)
            .field("sampler", &self.sampler)
            .finish_non_exhaustive()
    }
}
