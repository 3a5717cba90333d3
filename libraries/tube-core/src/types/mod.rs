/// Domain types for Tube Queue
mod item;
mod snapshot;

pub use item::{Item, ItemId, ItemMetadata};
pub use snapshot::PersistedSnapshot;
