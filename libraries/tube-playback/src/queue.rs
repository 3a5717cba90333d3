//! Queue store
//!
//! Ordered items plus a cursor. The cursor names the item loaded into the
//! player, which is not necessarily playing.
//!
//! Invariant: `cursor < len` whenever the queue is non-empty, `cursor == 0`
//! when it is empty. Every mutation below preserves it; invalid input is a
//! no-op rather than an error.

use tube_core::Item;

/// Result of [`Queue::remove_at`]
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// The removed item
    pub item: Item,

    /// Whether the removed slot was under the cursor
    pub was_current: bool,
}

/// Playlist queue with a cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue {
    items: Vec<Item>,
    cursor: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a queue from persisted parts, clamping a stale cursor to 0
    pub fn from_parts(items: Vec<Item>, cursor: usize) -> Self {
        let cursor = if cursor < items.len() { cursor } else { 0 };
        Self { items, cursor }
    }

    /// Insert at the end
    ///
    /// Returns `true` when the queue was empty, in which case the new item
    /// becomes the cursor target. No other append moves the cursor.
    pub fn append(&mut self, item: Item) -> bool {
        let was_empty = self.items.is_empty();
        self.items.push(item);
        if was_empty {
            self.cursor = 0;
        }
        was_empty
    }

    /// Remove the item at `index`
    ///
    /// Cursor adjustment:
    /// - removed before the cursor: cursor moves back by one
    /// - removed at the cursor: cursor is clamped to the new last index
    /// - removed after the cursor: unchanged
    pub fn remove_at(&mut self, index: usize) -> Option<Removal> {
        if index >= self.items.len() {
            return None;
        }

        let item = self.items.remove(index);
        let was_current = index == self.cursor;

        if self.items.is_empty() {
            self.cursor = 0;
        } else if index < self.cursor {
            self.cursor -= 1;
        } else if was_current {
            self.cursor = self.cursor.min(self.items.len() - 1);
        }

        Some(Removal { item, was_current })
    }

    /// Move the item at `from` so that it ends up at index `to`
    ///
    /// `to` is clamped to the last index. Returns `false` (no-op) when `from`
    /// is out of bounds or equals the clamped `to`. The final position is the
    /// same whichever direction the item travels.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        if from >= len {
            return false;
        }
        let to = to.min(len - 1);
        if from == to {
            return false;
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);

        let cursor = self.cursor;
        if from == cursor {
            self.cursor = to;
        } else if from < cursor && cursor <= to {
            self.cursor -= 1;
        } else if to <= cursor && cursor < from {
            self.cursor += 1;
        }

        true
    }

    /// Point the cursor at `index`; no-op (returns `false`) if out of bounds
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.cursor = index;
        true
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = 0;
    }

    /// Index after the cursor, wrapping; `None` when empty
    ///
    /// A single-item queue yields its own index (implicit repeat-one).
    pub fn next_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        Some((self.cursor + 1) % self.items.len())
    }

    /// Index before the cursor, wrapping; `None` when empty
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        Some((self.cursor + len - 1) % len)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item under the cursor
    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    /// Get item at index
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Items in play order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Total number of items in queue
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
