/// Durable projection of the queue
use super::Item;
use serde::{Deserialize, Serialize};

/// Queue, cursor and the add-panel visibility flag as read at startup
///
/// There is no schema version. Loaders substitute `Default` values for any
/// field that fails validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    /// Items in play order
    pub queue: Vec<Item>,

    /// Index of the item loaded into the player (0 when the queue is empty)
    pub cursor: usize,

    /// Whether the add-item panel is visible
    pub ui_flag: bool,
}

impl PersistedSnapshot {
    /// Item under the cursor, if any
    pub fn current(&self) -> Option<&Item> {
        self.queue.get(self.cursor)
    }
}
