//! Configuration model loaded from external sources.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::sync::controller::SyncSettings;

pub const ENV_PREFIX: &str = "TOOLTRACKER";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
/// Settings for talking to the tool tracker backend.
pub struct ClientConfig {
    pub base_url: String,
    pub per_page: usize,
    pub debounce_ms: u64,
    pub scroll_throttle_ms: u64,
    pub scroll_threshold_px: u32,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Layers built-in defaults, the optional file at `path` and
    /// `TOOLTRACKER_*` environment variables, later sources winning.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("base_url", "http://localhost:5000")?
            .set_default("per_page", 20)?
            .set_default("debounce_ms", 300)?
            .set_default("scroll_throttle_ms", 100)?
            .set_default("scroll_threshold_px", 200)?
            .set_default("request_timeout_secs", 30)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            per_page: self.per_page.max(1),
            search_debounce: Duration::from_millis(self.debounce_ms),
            scroll_throttle: Duration::from_millis(self.scroll_throttle_ms),
            near_bottom_threshold: self.scroll_threshold_px,
        }
    }
}
