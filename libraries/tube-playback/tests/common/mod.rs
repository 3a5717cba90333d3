//! Shared test infrastructure: a scriptable player and an inspectable store

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use tube_core::{Item, ItemId};
use tube_playback::{MediaPlayer, PlaybackConfig, PlaybackController, PlayerSignal};
use tube_storage::KeyValueStore;

static INIT: Once = Once::new();

/// Route controller logs to the test writer, once per test binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Command as observed by the fake player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCall {
    Load(String),
    Cue(String),
    Play,
    Pause,
    Stop,
    Seek(f64),
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub loaded: Option<ItemId>,
    pub current_time: f64,
    pub duration: f64,
    pub calls: Vec<PlayerCall>,
}

/// Player that records commands; clones share state
#[derive(Debug, Clone, Default)]
pub struct FakePlayer {
    state: Arc<Mutex<FakeState>>,
}

impl FakePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PlayerCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// IDs handed to `load`, in order
    pub fn loads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlayerCall::Load(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// IDs handed to `cue`, in order
    pub fn cues(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlayerCall::Cue(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn loaded(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .loaded
            .as_ref()
            .map(|id| id.as_str().to_string())
    }

    pub fn set_position(&self, current_time: f64, duration: f64) {
        let mut state = self.state.lock().unwrap();
        state.current_time = current_time;
        state.duration = duration;
    }
}

impl MediaPlayer for FakePlayer {
    fn load(&mut self, id: &ItemId) {
        let mut state = self.state.lock().unwrap();
        state.loaded = Some(id.clone());
        state.current_time = 0.0;
        state.calls.push(PlayerCall::Load(id.as_str().to_string()));
    }

    fn cue(&mut self, id: &ItemId) {
        let mut state = self.state.lock().unwrap();
        state.loaded = Some(id.clone());
        state.current_time = 0.0;
        state.calls.push(PlayerCall::Cue(id.as_str().to_string()));
    }

    fn play(&mut self) {
        self.state.lock().unwrap().calls.push(PlayerCall::Play);
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().calls.push(PlayerCall::Pause);
    }

    fn stop(&mut self) {
        self.state.lock().unwrap().calls.push(PlayerCall::Stop);
    }

    fn seek(&mut self, seconds: f64) {
        let mut state = self.state.lock().unwrap();
        state.current_time = seconds;
        state.calls.push(PlayerCall::Seek(seconds));
    }

    fn current_time(&self) -> f64 {
        self.state.lock().unwrap().current_time
    }

    fn duration(&self) -> f64 {
        self.state.lock().unwrap().duration
    }

    fn loaded_item_id(&self) -> Option<ItemId> {
        self.state.lock().unwrap().loaded.clone()
    }
}

/// In-memory store whose contents stay visible after it is moved
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut map = store.entries.lock().unwrap();
            for (key, value) in entries {
                map.insert((*key).to_string(), (*value).to_string());
            }
        }
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn json(&self, key: &str) -> Option<serde_json::Value> {
        self.raw(key)
            .map(|raw| serde_json::from_str(&raw).expect("stored value is JSON"))
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> tube_storage::Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> tube_storage::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> tube_storage::Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Eleven-character ID built from a short label, e.g. `"A"` -> `"AAAAAAAAAAA"`
pub fn id(label: &str) -> String {
    label.repeat(11).chars().take(11).collect()
}

pub fn item(label: &str) -> Item {
    Item::new(
        id(label),
        format!("Song {}", label),
        format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id(label)),
        format!("https://youtu.be/{}", id(label)),
    )
}

pub struct Harness {
    pub controller: PlaybackController<FakePlayer>,
    pub player: FakePlayer,
    pub store: SharedStore,
}

impl Harness {
    /// Controller over an empty store, player not ready
    pub fn new() -> Self {
        Self::with_store(SharedStore::new())
    }

    pub fn with_store(store: SharedStore) -> Self {
        init_tracing();
        let player = FakePlayer::new();
        let controller =
            PlaybackController::new(player.clone(), store.clone(), PlaybackConfig::default())
                .unwrap();
        Self {
            controller,
            player,
            store,
        }
    }

    /// Ready player with `labels` queued, the first one loaded
    pub fn ready_with(labels: &[&str]) -> Self {
        let mut harness = Self::new();
        harness.controller.on_signal(PlayerSignal::Ready);
        for label in labels {
            harness.controller.append(item(label));
        }
        harness.controller.drain_events();
        harness.player.clear_calls();
        harness
    }

    pub fn cursor_id(&self) -> Option<String> {
        self.controller
            .current_item()
            .map(|item| item.id.as_str().to_string())
    }

    pub fn queue_ids(&self) -> Vec<String> {
        self.controller
            .items()
            .iter()
            .map(|item| item.id.as_str().to_string())
            .collect()
    }
}
