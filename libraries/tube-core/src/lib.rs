//! Tube Queue Core
//!
//! Platform-agnostic core types, traits, and error handling for Tube Queue.
//!
//! This crate provides the building blocks shared by the storage, metadata
//! and playback crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Item`, `ItemId`, `ItemMetadata`, `PersistedSnapshot`
//! - **Identity Resolver**: turns a pasted link into an `ItemId`
//! - **Core Traits**: `MetadataLookup`
//! - **Error Handling**: Unified `TubeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tube_core::{resolve, Item, ItemMetadata};
//!
//! let link = "https://youtu.be/dQw4w9WgXcQ";
//! let id = resolve(link).expect("short link carries an id");
//! assert_eq!(id.as_str(), "dQw4w9WgXcQ");
//!
//! let item = Item::from_metadata(
//!     id,
//!     ItemMetadata {
//!         title: "Never Gonna Give You Up".to_string(),
//!         thumbnail_url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
//!     },
//!     link,
//! );
//! assert_eq!(item.source_url, link);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod resolver;
pub mod time;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TubeError};
pub use resolver::{resolve, resolve_link};
pub use time::{format_time, sanitize_seconds};
pub use traits::MetadataLookup;
pub use types::{Item, ItemId, ItemMetadata, PersistedSnapshot};
