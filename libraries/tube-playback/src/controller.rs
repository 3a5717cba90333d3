//! Playback controller - core orchestration
//!
//! Owns the queue, the player bridge, the persistence adapter and the timers.
//! Every mutation happens through `&mut self` on one logical thread: user
//! commands, player signals and timer expiry all funnel through here, and the
//! controller records [`PlaybackEvent`]s for the presentation layer.
//!
//! Time is logical. Call [`PlaybackController::advance`] or
//! [`PlaybackController::run_until`] to fire due timers and sampler ticks.

use crate::{
    bridge::{BridgeEvent, PlayerBridge},
    config::PlaybackConfig,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    player::{MediaPlayer, PlayerSignal},
    queue::Queue,
    timers::{TimerKind, Timers},
    types::{AutoplayReason, NowPlaying, PlaybackState, PlaybackStatus},
};
use std::time::Duration;
use tracing::{debug, info, warn};
use tube_core::{Item, PersistedSnapshot};
use tube_storage::{KeyValueStore, Persistence};

/// Queue-driven controller for one external player
pub struct PlaybackController<P: MediaPlayer> {
    queue: Queue,
    bridge: PlayerBridge<P>,
    persistence: Persistence,
    config: PlaybackConfig,
    timers: Timers,

    state: PlaybackState,
    current_time: f64,
    duration: f64,
    ui_flag: bool,

    // Set when an autoplay-advance starts; cleared by the cooldown timer,
    // by an error event, or by manual navigation.
    autoplay_guard: bool,

    // Reason for the armed AutoplayDelay timer, or for an advance the guard
    // deferred until the cooldown expires
    pending_autoplay: Option<AutoplayReason>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<P: MediaPlayer> PlaybackController<P> {
    /// Create a controller, restoring queue, cursor and UI flag from `store`
    ///
    /// Corrupt persisted values fall back to defaults. The restored cursor
    /// item is cued once the player signals ready.
    pub fn new(
        player: P,
        store: impl KeyValueStore + 'static,
        config: PlaybackConfig,
    ) -> Result<Self> {
        config.validate()?;

        let persistence = Persistence::with_keys(store, config.storage_keys.clone());
        let PersistedSnapshot {
            queue,
            cursor,
            ui_flag,
        } = persistence.load();
        let queue = Queue::from_parts(queue, cursor);

        info!(
            items = queue.len(),
            cursor = queue.cursor(),
            "Restored playback queue"
        );

        Ok(Self {
            queue,
            bridge: PlayerBridge::new(player, config.sample_interval()),
            persistence,
            config,
            timers: Timers::new(),
            state: PlaybackState::Idle,
            current_time: 0.0,
            duration: 0.0,
            ui_flag,
            autoplay_guard: false,
            pending_autoplay: None,
            pending_events: Vec::new(),
        })
    }

    // ===== Queue Management =====

    /// Append `item` to the end of the queue
    ///
    /// The first item of an empty queue becomes the cursor target and, when
    /// the player is ready, is loaded straight away.
    pub fn append(&mut self, item: Item) {
        debug!(id = %item.id, title = %item.title, "Appending item");
        let was_empty = self.queue.append(item);

        self.persist_queue();
        self.emit_queue_changed();

        if was_empty {
            self.persist_cursor();
            self.emit_cursor_changed();
            if self.bridge.is_ready() {
                self.load_current();
            }
        }
    }

    /// Remove the item at `index`; out-of-bounds is a no-op
    ///
    /// Removing the cursor item stops playback and resets to `Idle` before the
    /// item leaves the queue.
    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        if index >= self.queue.len() {
            debug!(index, len = self.queue.len(), "Ignoring out-of-bounds remove");
            return None;
        }

        if index == self.queue.cursor() {
            self.stop_and_reset();
        }

        let cursor_before = self.queue.cursor();
        let removal = self.queue.remove_at(index)?;
        debug!(
            index,
            id = %removal.item.id,
            was_current = removal.was_current,
            "Removed item"
        );

        self.persist_queue();
        self.persist_cursor();
        self.emit_queue_changed();
        if self.queue.cursor() != cursor_before || removal.was_current {
            self.emit_cursor_changed();
        }

        self.reconcile_loaded_item();
        Some(removal.item)
    }

    /// Move the item at `from` to `to`; returns `false` for a no-op
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let cursor_before = self.queue.cursor();
        if !self.queue.move_item(from, to) {
            return false;
        }
        debug!(from, to, cursor = self.queue.cursor(), "Moved item");

        self.persist_queue();
        self.persist_cursor();
        self.emit_queue_changed();
        if self.queue.cursor() != cursor_before {
            self.emit_cursor_changed();
        }

        self.reconcile_loaded_item();
        true
    }

    /// Point the cursor at `index` without loading; returns `false` for a no-op
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if !self.queue.set_cursor(index) {
            return false;
        }
        self.persist_cursor();
        self.emit_cursor_changed();
        true
    }

    /// Stop playback, empty the queue and wipe the persisted snapshot
    pub fn clear(&mut self) {
        info!(items = self.queue.len(), "Clearing queue");
        self.stop_and_reset();
        self.queue.clear();
        self.ui_flag = false;

        if let Err(e) = self.persistence.clear() {
            warn!(error = %e, "Failed to clear persisted snapshot");
        }

        self.emit_queue_changed();
        self.emit_cursor_changed();
        self.emit(PlaybackEvent::UiFlagChanged { visible: false });
    }

    // ===== Playback Control =====

    /// Load and play the item at `index`
    ///
    /// Manual navigation wins over autoplay: any pending advance and the
    /// reentrancy guard are dropped first.
    pub fn play_at(&mut self, index: usize) -> Result<()> {
        if !self.bridge.is_ready() {
            return Err(PlaybackError::PlayerNotReady);
        }
        if self.queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if index >= self.queue.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }

        self.release_autoplay();

        if self.queue.cursor() != index {
            self.queue.set_cursor(index);
            self.emit_cursor_changed();
        }
        self.persist_cursor();
        self.load_current();
        Ok(())
    }

    /// Skip to the next item, wrapping; no-op on an empty queue
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        match self.queue.next_index() {
            Some(index) => self.play_at(index),
            None => {
                debug!("next() on empty queue");
                Ok(())
            }
        }
    }

    /// Go back one item, wrapping; no-op on an empty queue
    pub fn previous(&mut self) -> Result<()> {
        match self.queue.previous_index() {
            Some(index) => self.play_at(index),
            None => {
                debug!("previous() on empty queue");
                Ok(())
            }
        }
    }

    /// Start or resume the cursor item
    ///
    /// Reloads when the player holds a different item than the cursor.
    pub fn play(&mut self) -> Result<()> {
        if !self.cursor_item_loaded()? {
            return self.play_at(self.queue.cursor());
        }
        self.bridge.play();
        Ok(())
    }

    /// Pause the player; ignored until the player is ready
    pub fn pause(&mut self) {
        if self.bridge.is_ready() {
            self.bridge.pause();
        }
    }

    /// Pause when playing, otherwise play
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if !self.cursor_item_loaded()? {
            return self.play_at(self.queue.cursor());
        }

        if self.state.is_playing() {
            self.bridge.pause();
        } else {
            self.bridge.play();
        }
        Ok(())
    }

    /// Seek within the loaded item
    ///
    /// The target is clamped to `[0, duration]`; non-finite targets become 0.
    /// The displayed position is updated before the player confirms.
    /// Returns the position actually sent to the player.
    pub fn seek(&mut self, seconds: f64) -> Result<f64> {
        if !self.bridge.is_ready() {
            return Err(PlaybackError::PlayerNotReady);
        }

        if self.duration == 0.0 {
            self.duration = self.bridge.duration();
        }
        let target = if seconds.is_finite() {
            seconds.clamp(0.0, self.duration)
        } else {
            0.0
        };

        self.bridge.seek(target);
        self.current_time = target;
        self.emit_position();
        Ok(target)
    }

    // ===== Player Signals =====

    /// Feed a lifecycle callback from the external player
    pub fn on_signal(&mut self, signal: PlayerSignal) {
        match self.bridge.translate(signal) {
            BridgeEvent::Ready { first } => {
                info!(first, "Player ready");
                if first && !self.queue.is_empty() {
                    self.timers
                        .schedule(TimerKind::RestoreCue, self.config.restore_cue_delay());
                }
            }
            BridgeEvent::Playing => {
                self.set_state(PlaybackState::Playing);
                self.duration = self.bridge.duration();
                self.bridge.start_sampler(self.timers.now());
            }
            BridgeEvent::Paused => {
                self.set_state(PlaybackState::Paused);
                self.bridge.stop_sampler();
                self.current_time = self.bridge.position();
            }
            BridgeEvent::Ended => {
                self.set_state(PlaybackState::Ended);
                self.bridge.stop_sampler();
                self.current_time = 0.0;
                self.emit_position();
                self.schedule_autoplay(AutoplayReason::Ended);
            }
            BridgeEvent::Error(code) => {
                self.emit(PlaybackEvent::PlayerError { code });
                self.set_state(PlaybackState::Error);
                self.bridge.stop_sampler();

                // A stale guard must not swallow the skip
                self.autoplay_guard = false;
                self.timers.cancel(TimerKind::AutoplayCooldown);
                self.schedule_autoplay(AutoplayReason::Error);
            }
            BridgeEvent::Unstarted | BridgeEvent::Buffering | BridgeEvent::Cued => {
                debug!(state = ?self.state, "Player state change needs no transition");
            }
        }
    }

    // ===== Timers =====

    /// Current logical time
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Earliest pending timer or sampler tick
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.timers.next_deadline(), self.bridge.sampler_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Move the clock forward by `elapsed`
    pub fn advance(&mut self, elapsed: Duration) {
        self.run_until(self.timers.now() + elapsed);
    }

    /// Fire every timer and sampler tick due at or before `until`, in order
    ///
    /// On a tie the timer fires before the sampler tick.
    pub fn run_until(&mut self, until: Duration) {
        loop {
            let timer_due = self.timers.next_deadline().filter(|at| *at <= until);
            let sample_due = self.bridge.sampler_deadline().filter(|at| *at <= until);

            match (timer_due, sample_due) {
                (Some(timer), Some(sample)) if sample < timer => self.sample(sample),
                (Some(_), _) => {
                    if let Some((kind, _)) = self.timers.pop_due(until) {
                        self.fire(kind);
                    }
                }
                (None, Some(sample)) => self.sample(sample),
                (None, None) => break,
            }
        }
        self.timers.advance_to(until);
    }

    /// Cancel every timer and the sampler
    ///
    /// The controller stays usable for inspection but ignores the player
    /// until it signals ready again.
    pub fn shutdown(&mut self) {
        info!("Shutting down playback controller");
        self.timers.cancel_all();
        self.pending_autoplay = None;
        self.autoplay_guard = false;
        self.bridge.teardown();
    }

    // ===== UI Flag =====

    /// Show or hide the add-item panel
    pub fn set_ui_flag(&mut self, visible: bool) {
        self.ui_flag = visible;
        if let Err(e) = self.persistence.save_ui_flag(visible) {
            warn!(error = %e, "Failed to persist UI flag");
        }
        self.emit(PlaybackEvent::UiFlagChanged { visible });
    }

    /// Flip the add-item panel; returns the new value
    pub fn toggle_ui_flag(&mut self) -> bool {
        let visible = !self.ui_flag;
        self.set_ui_flag(visible);
        visible
    }

    // ===== State Queries =====

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn items(&self) -> &[Item] {
        self.queue.items()
    }

    pub fn cursor(&self) -> usize {
        self.queue.cursor()
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.queue.current()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            state: self.state,
            current_time_secs: self.current_time,
            duration_secs: self.duration,
        }
    }

    /// Cursor item with its live status; `None` on an empty queue
    pub fn now_playing(&self) -> Option<NowPlaying> {
        self.queue.current().map(|item| NowPlaying {
            index: self.queue.cursor(),
            item: item.clone(),
            status: self.status(),
        })
    }

    pub fn ui_flag(&self) -> bool {
        self.ui_flag
    }

    /// Whether an autoplay-advance is inside its cooldown window
    pub fn is_autoplay_guarded(&self) -> bool {
        self.autoplay_guard
    }

    /// In-memory view of what is persisted
    pub fn snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            queue: self.queue.items().to_vec(),
            cursor: self.queue.cursor(),
            ui_flag: self.ui_flag,
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn player(&self) -> &P {
        self.bridge.player()
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn fire(&mut self, kind: TimerKind) {
        debug!(?kind, now = ?self.timers.now(), "Timer fired");
        match kind {
            TimerKind::AutoplayDelay => {
                if let Some(reason) = self.pending_autoplay.take() {
                    self.autoplay_advance(reason);
                }
            }
            TimerKind::AutoplayCooldown => {
                self.autoplay_guard = false;
                let stalled = matches!(self.state, PlaybackState::Ended | PlaybackState::Error);
                if stalled && !self.timers.is_pending(TimerKind::AutoplayDelay) {
                    if let Some(reason) = self.pending_autoplay.take() {
                        self.autoplay_advance(reason);
                    }
                }
            }
            TimerKind::RestoreCue => self.restore_cue(),
        }
    }

    fn sample(&mut self, at: Duration) {
        self.timers.advance_to(at);
        if let Some(position) = self.bridge.take_sample(at) {
            self.current_time = position;
            if self.duration == 0.0 {
                self.duration = self.bridge.duration();
            }
            self.emit_position();
        }
    }

    fn schedule_autoplay(&mut self, reason: AutoplayReason) {
        let delay = match reason {
            AutoplayReason::Ended => self.config.autoplay_delay_after_end(),
            AutoplayReason::Error => self.config.autoplay_delay_after_error(),
        };
        debug!(?reason, ?delay, "Scheduling autoplay");
        self.pending_autoplay = Some(reason);
        self.timers.schedule(TimerKind::AutoplayDelay, delay);
    }

    fn autoplay_advance(&mut self, reason: AutoplayReason) {
        if self.autoplay_guard {
            // Retried when the cooldown releases the guard
            debug!(?reason, "Autoplay in cooldown, deferring");
            self.pending_autoplay = Some(reason);
            return;
        }

        let Some(to) = self.queue.next_index() else {
            self.set_state(PlaybackState::Idle);
            return;
        };
        let from = self.queue.cursor();

        self.autoplay_guard = true;
        self.timers
            .schedule(TimerKind::AutoplayCooldown, self.config.autoplay_cooldown());

        if to != from {
            self.queue.set_cursor(to);
            self.emit_cursor_changed();
        }
        self.persist_cursor();

        info!(from, to, ?reason, "Autoplay advancing");
        self.load_current();
        self.emit(PlaybackEvent::AutoplayAdvanced { from, to, reason });
    }

    fn restore_cue(&mut self) {
        if self.state != PlaybackState::Idle || !self.bridge.is_ready() {
            return;
        }
        self.cue_current();
    }

    /// Hand the cursor item to the player and start it
    fn load_current(&mut self) {
        let index = self.queue.cursor();
        let Some(item) = self.queue.get(index) else {
            return;
        };

        self.bridge.stop_sampler();
        self.bridge.load(item);
        let item_id = item.id.clone();

        self.current_time = 0.0;
        self.duration = 0.0;
        self.emit(PlaybackEvent::ItemLoaded {
            index,
            item_id,
            cued: false,
        });
        self.set_state(PlaybackState::Loading);
    }

    /// Hand the cursor item to the player without starting it
    fn cue_current(&mut self) {
        let index = self.queue.cursor();
        let Some(item) = self.queue.get(index) else {
            return;
        };

        self.bridge.cue(item);
        let item_id = item.id.clone();
        self.emit(PlaybackEvent::ItemLoaded {
            index,
            item_id,
            cued: true,
        });
    }

    fn cursor_item_loaded(&self) -> Result<bool> {
        if !self.bridge.is_ready() {
            return Err(PlaybackError::PlayerNotReady);
        }
        let current = self.queue.current().ok_or(PlaybackError::QueueEmpty)?;
        Ok(self.bridge.loaded_item_id().as_ref() == Some(&current.id))
    }

    /// Make the player agree with the cursor after a structural change
    fn reconcile_loaded_item(&mut self) {
        let Some(loaded) = self.bridge.loaded_item_id() else {
            return;
        };
        let Some(current) = self.queue.current() else {
            return;
        };
        if loaded == current.id {
            return;
        }

        warn!(
            loaded = %loaded,
            cursor_item = %current.id,
            cursor = self.queue.cursor(),
            "Loaded item does not match cursor, re-cueing"
        );
        self.reset_playback();
        if self.bridge.is_ready() {
            self.cue_current();
        }
    }

    /// Stop the player and reset to `Idle`
    fn stop_and_reset(&mut self) {
        if self.bridge.is_ready() {
            self.bridge.stop();
        }
        self.reset_playback();
    }

    /// Cancel sampler and timers, drop the guard and go `Idle`
    fn reset_playback(&mut self) {
        self.bridge.stop_sampler();
        self.timers.cancel_all();
        self.pending_autoplay = None;
        self.autoplay_guard = false;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.set_state(PlaybackState::Idle);
    }

    fn release_autoplay(&mut self) {
        self.autoplay_guard = false;
        self.pending_autoplay = None;
        self.timers.cancel(TimerKind::AutoplayDelay);
        self.timers.cancel(TimerKind::AutoplayCooldown);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "Playback state changed");
            self.state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn persist_queue(&mut self) {
        if let Err(e) = self.persistence.save_queue(self.queue.items()) {
            warn!(error = %e, "Failed to persist queue");
        }
    }

    fn persist_cursor(&mut self) {
        if let Err(e) = self.persistence.save_cursor(self.queue.cursor()) {
            warn!(error = %e, "Failed to persist cursor");
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_cursor_changed(&mut self) {
        self.emit(PlaybackEvent::CursorChanged {
            index: self.queue.cursor(),
        });
    }

    fn emit_position(&mut self) {
        self.emit(PlaybackEvent::PositionUpdate {
            position_secs: self.current_time,
            duration_secs: self.duration,
        });
    }
}

impl<P: MediaPlayer> std::fmt::Debug for PlaybackController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("queue", &self.queue)
            .field("bridge", &self.bridge)
            .field("state", &self.state)
            .field("autoplay_guard", &self.autoplay_guard)
            .field("pending_autoplay", &self.pending_autoplay)
            .finish_non_exhaustive()
    }
}
