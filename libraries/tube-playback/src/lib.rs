//! Tube Queue - Playback Management
//!
//! Queue store and playback state machine for an embedded, event-emitting
//! media player.
//!
//! This crate provides:
//! - Queue with a cursor (append, remove, drag-reorder, wrap-around navigation)
//! - Playback state machine (idle/loading/playing/paused/ended/error)
//! - Autoplay-advance on end and skip-on-error, with a reentrancy guard
//! - Player bridge with position sampling
//! - Persistence of queue, cursor and UI flag on every change
//! - Tokio driver for hosts that want real timers
//!
//! # Architecture
//!
//! The external player is reached only through the [`MediaPlayer`] trait, and
//! only by the player bridge. [`PlaybackController`] is synchronous and
//! runs on a logical clock, so it can be driven step by step in tests or
//! hosted by [`driver::spawn_driver`].
//!
//! # Example
//!
//! ```rust
//! use tube_core::{Item, ItemId};
//! use tube_playback::{
//!     MediaPlayer, PlaybackConfig, PlaybackController, PlaybackState, PlayerSignal,
//!     PlayerStateCode,
//! };
//! use tube_storage::MemoryStore;
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Silent(Option<ItemId>);
//!
//! impl MediaPlayer for Silent {
//!     fn load(&mut self, id: &ItemId) { self.0 = Some(id.clone()); }
//!     fn cue(&mut self, id: &ItemId) { self.0 = Some(id.clone()); }
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) {}
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn duration(&self) -> f64 { 0.0 }
//!     fn loaded_item_id(&self) -> Option<ItemId> { self.0.clone() }
//! }
//!
//! let mut controller =
//!     PlaybackController::new(Silent::default(), MemoryStore::new(), PlaybackConfig::default())
//!         .unwrap();
//! controller.on_signal(PlayerSignal::Ready);
//!
//! controller.append(Item::new("aaaaaaaaaaa", "First", "", ""));
//! controller.append(Item::new("bbbbbbbbbbb", "Second", "", ""));
//! assert_eq!(controller.state(), PlaybackState::Loading);
//!
//! // First item ends, second one is loaded after the autoplay delay
//! controller.on_signal(PlayerSignal::StateChanged(PlayerStateCode::Ended));
//! controller.advance(Duration::from_secs(1));
//! assert_eq!(controller.cursor(), 1);
//! ```

mod bridge;
mod config;
mod controller;
pub mod driver;
mod error;
pub mod events;
mod player;
mod queue;
mod timers;
pub mod types;

// Public exports
pub use config::PlaybackConfig;
pub use controller::PlaybackController;
pub use driver::{spawn_driver, DriverHandle, PlayerCommand};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use player::{MediaPlayer, PlayerSignal, PlayerStateCode};
pub use queue::{Queue, Removal};
pub use types::{AutoplayReason, NowPlaying, PlaybackState, PlaybackStatus};
