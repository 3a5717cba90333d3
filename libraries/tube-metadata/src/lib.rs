//! Tube Queue Metadata
//!
//! Turns a pasted link into a queue [`Item`](tube_core::Item) by resolving
//! its id and asking the oEmbed endpoint for a title and thumbnail.
//!
//! # Example
//!
//! ```ignore
//! use tube_metadata::{fetch_item, OEmbedClient, OEmbedConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OEmbedClient::new(OEmbedConfig::default())?;
//!     let item = fetch_item(&client, "https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("Adding {}", item.title);
//!     Ok(())
//! }
//! ```

mod fetch;
mod oembed;

pub use fetch::fetch_item;
pub use oembed::{watch_url, OEmbedClient, OEmbedConfig, DEFAULT_BASE_URL};
