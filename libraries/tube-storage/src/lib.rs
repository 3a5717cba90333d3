//! Tube Queue Storage
//!
//! Durable mapping from a small fixed set of string keys to JSON values:
//! the queue, the cursor and the add-panel flag.
//!
//! # Architecture
//!
//! - **Medium**: [`KeyValueStore`] is a plain get/set/remove string store.
//!   [`MemoryStore`] and the JSON-file backed [`FileStore`] implement it.
//! - **Adapter**: [`Persistence`] validates what it reads and substitutes
//!   defaults for anything malformed. There is no schema versioning.
//!
//! # Example
//!
//! ```rust
//! use tube_storage::{MemoryStore, Persistence, KEY_CURSOR};
//!
//! let store = MemoryStore::with_entries([(KEY_CURSOR, "\"abc\"")]);
//! let persistence = Persistence::new(store);
//!
//! let snapshot = persistence.load();
//! assert_eq!(snapshot.cursor, 0);
//! assert!(snapshot.queue.is_empty());
//! ```

mod error;
pub mod snapshot;
pub mod store;

pub use error::{Result, StorageError};
pub use snapshot::{Persistence, StorageKeys, KEY_CURSOR, KEY_QUEUE, KEY_UI_FLAG};
pub use store::{FileStore, KeyValueStore, MemoryStore};
