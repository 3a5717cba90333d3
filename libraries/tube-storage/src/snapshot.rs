//! Playlist snapshot persistence
//!
//! Three logical keys hold the queue (JSON array of items), the cursor (JSON
//! integer) and the add-panel flag (JSON boolean). Every key is validated on
//! its own: a corrupt cursor does not throw away a good queue.

use crate::error::{Result, StorageError};
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use tube_core::{Item, PersistedSnapshot};

/// Queue snapshot key
pub const KEY_QUEUE: &str = "music_player_songs";

/// Cursor key
pub const KEY_CURSOR: &str = "music_player_current";

/// Add-panel visibility key
pub const KEY_UI_FLAG: &str = "music_player_show_add_song";

/// Key names used in the persistence medium
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub queue: String,
    pub cursor: String,
    pub ui_flag: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            queue: KEY_QUEUE.to_string(),
            cursor: KEY_CURSOR.to_string(),
            ui_flag: KEY_UI_FLAG.to_string(),
        }
    }
}

/// Parse a stored queue; anything other than an array of items is corrupt
pub fn parse_queue(key: &str, raw: &str) -> Result<Vec<Item>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| StorageError::corrupt(key, e.to_string()))?;

    let Value::Array(elements) = value else {
        return Err(StorageError::corrupt(key, "expected an array"));
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            serde_json::from_value::<Item>(element)
                .map_err(|e| StorageError::corrupt(key, format!("element {}: {}", i, e)))
        })
        .collect()
}

/// Parse a stored cursor; must be a non-negative JSON integer
pub fn parse_cursor(key: &str, raw: &str) -> Result<usize> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| StorageError::corrupt(key, e.to_string()))?;

    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| StorageError::corrupt(key, "expected a non-negative integer"))
}

/// Parse a stored flag; must be a JSON boolean
pub fn parse_ui_flag(key: &str, raw: &str) -> Result<bool> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| StorageError::corrupt(key, e.to_string()))?;

    value
        .as_bool()
        .ok_or_else(|| StorageError::corrupt(key, "expected a boolean"))
}

/// Persistence adapter over a [`KeyValueStore`]
///
/// Reads never fail: missing or corrupt values are replaced by defaults
/// (`[]`, `0`, `false`). Writes report medium errors to the caller, which
/// treats them as fire-and-forget.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl Persistence {
    /// Create an adapter with the default key names
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    /// Create an adapter with custom key names
    pub fn with_keys(store: impl KeyValueStore + 'static, keys: StorageKeys) -> Self {
        Self {
            store: Box::new(store),
            keys,
        }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Read and validate the whole snapshot
    ///
    /// A cursor pointing past the end of a non-empty queue is reset to 0.
    pub fn load(&self) -> PersistedSnapshot {
        let queue = self.load_queue();
        let mut cursor = self.load_cursor();
        let ui_flag = self.load_ui_flag();

        if cursor >= queue.len() && cursor != 0 {
            warn!(
                cursor,
                len = queue.len(),
                "Persisted cursor outside queue, resetting to 0"
            );
            cursor = 0;
        }

        debug!(items = queue.len(), cursor, ui_flag, "Loaded snapshot");
        PersistedSnapshot {
            queue,
            cursor,
            ui_flag,
        }
    }

    pub fn load_queue(&self) -> Vec<Item> {
        self.read_validated(&self.keys.queue, parse_queue)
            .unwrap_or_default()
    }

    pub fn load_cursor(&self) -> usize {
        self.read_validated(&self.keys.cursor, parse_cursor)
            .unwrap_or_default()
    }

    pub fn load_ui_flag(&self) -> bool {
        self.read_validated(&self.keys.ui_flag, parse_ui_flag)
            .unwrap_or_default()
    }

    pub fn save_queue(&mut self, queue: &[Item]) -> Result<()> {
        let raw = serde_json::to_string(queue)?;
        self.store.set(&self.keys.queue, &raw)
    }

    pub fn save_cursor(&mut self, cursor: usize) -> Result<()> {
        let raw = serde_json::to_string(&cursor)?;
        self.store.set(&self.keys.cursor, &raw)
    }

    pub fn save_ui_flag(&mut self, flag: bool) -> Result<()> {
        let raw = serde_json::to_string(&flag)?;
        self.store.set(&self.keys.ui_flag, &raw)
    }

    /// Remove all three keys
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.keys.queue)?;
        self.store.remove(&self.keys.cursor)?;
        self.store.remove(&self.keys.ui_flag)
    }

    fn read_validated<T>(&self, key: &str, parse: fn(&str, &str) -> Result<T>) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read persisted value");
                return None;
            }
        };

        match parse(key, &raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding corrupt persisted value");
                None
            }
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
