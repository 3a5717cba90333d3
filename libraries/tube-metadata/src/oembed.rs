//! oEmbed metadata client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use tube_core::{ItemId, ItemMetadata, MetadataLookup, Result, TubeError};
use url::Url;

/// Public oEmbed host
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Configuration for [`OEmbedClient`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OEmbedConfig {
    /// Host serving `/oembed` (no trailing slash needed)
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for OEmbedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl OEmbedConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
    #[serde(default)]
    thumbnail_url: String,
}

/// Metadata lookup backed by the oEmbed endpoint
///
/// # Example
///
/// ```ignore
/// use tube_core::{resolve, MetadataLookup};
/// use tube_metadata::{OEmbedClient, OEmbedConfig};
///
/// let client = OEmbedClient::new(OEmbedConfig::default())?;
/// let id = resolve("https://youtu.be/dQw4w9WgXcQ").unwrap();
/// let metadata = client.lookup(&id).await?;
/// println!("{}", metadata.title);
/// ```
pub struct OEmbedClient {
    http: Client,
    endpoint: Url,
}

impl OEmbedClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OEmbedConfig) -> Result<Self> {
        let base = config.base_url.trim_end_matches('/');
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(TubeError::Config(format!(
                "oEmbed base URL must start with http:// or https://: {}",
                config.base_url
            )));
        }

        let endpoint = Url::parse(&format!("{}/oembed", base))
            .map_err(|e| TubeError::Config(format!("Invalid oEmbed base URL: {}", e)))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("TubeQueue/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TubeError::Config(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    /// Full request URL for `id`
    pub fn request_url(&self, id: &ItemId) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", &watch_url(id))
            .append_pair("format", "json");
        url
    }
}

/// Canonical watch link for an id
pub fn watch_url(id: &ItemId) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

#[async_trait]
impl MetadataLookup for OEmbedClient {
    async fn lookup(&self, id: &ItemId) -> Result<ItemMetadata> {
        let url = self.request_url(id);
        debug!(url = %url, "Fetching oEmbed metadata");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TubeError::lookup_failed(id.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(id = %id, status = status.as_u16(), "oEmbed lookup rejected");
            return Err(TubeError::lookup_failed(
                id.as_str(),
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body: OEmbedResponse = response.json().await.map_err(|e| {
            TubeError::lookup_failed(id.as_str(), format!("Failed to parse response: {}", e))
        })?;

        debug!(id = %id, title = %body.title, "Fetched oEmbed metadata");
        Ok(ItemMetadata {
            title: body.title,
            thumbnail_url: body.thumbnail_url,
        })
    }
}
