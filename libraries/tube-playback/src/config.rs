//! Playback configuration
//!
//! Every fixed delay of the state machine lives here. Values are layered from
//! an optional TOML file and `TUBE_*` environment variables, e.g.
//! `TUBE_AUTOPLAY_COOLDOWN_MS=3000` or `TUBE_STORAGE_KEYS__QUEUE=my_queue`.

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tube_storage::StorageKeys;

/// Configuration for [`PlaybackController`](crate::PlaybackController)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Position sampling interval while playing (default: 1000)
    pub sample_interval_ms: u64,

    /// Delay between an `ended` event and autoplay-advance (default: 1000)
    pub autoplay_delay_after_end_ms: u64,

    /// Delay between an `error` event and skip-to-next (default: 2000)
    pub autoplay_delay_after_error_ms: u64,

    /// How long the autoplay reentrancy guard stays engaged (default: 2000)
    pub autoplay_cooldown_ms: u64,

    /// Delay between the first `ready` and cueing the restored item (default: 500)
    pub restore_cue_delay_ms: u64,

    /// Key names in the persistence medium
    pub storage_keys: StorageKeys,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            autoplay_delay_after_end_ms: 1000,
            autoplay_delay_after_error_ms: 2000,
            autoplay_cooldown_ms: 2000,
            restore_cue_delay_ms: 500,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl PlaybackConfig {
    /// Load configuration from an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path).required(false));
        }

        // Override with environment variables (prefixed with TUBE_)
        settings = settings.add_source(
            config::Environment::with_prefix("TUBE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlaybackError::Config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| PlaybackError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the sampler cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_ms == 0 {
            return Err(PlaybackError::Config(
                "sample_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn autoplay_delay_after_end(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_after_end_ms)
    }

    pub fn autoplay_delay_after_error(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_after_error_ms)
    }

    pub fn autoplay_cooldown(&self) -> Duration {
        Duration::from_millis(self.autoplay_cooldown_ms)
    }

    pub fn restore_cue_delay(&self) -> Duration {
        Duration::from_millis(self.restore_cue_delay_ms)
    }
}
