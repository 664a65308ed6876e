//! Configuration for elevation tile sources.

use crate::error::{Result, TileSourceError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Text DEM tiles published by the Geospatial Information Authority of Japan.
pub const DEFAULT_TILE_URL: &str = "https://cyberjapandata.gsi.go.jp/xyz/dem/{z}/{x}/{y}.txt";

/// Where elevation tiles come from and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSourceConfig {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,

    /// Local tile tree (`{dir}/{z}/{x}/{y}.txt`). Takes precedence over
    /// `url_template` when set.
    pub tile_dir: Option<PathBuf>,

    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for TileSourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_TILE_URL.to_string(),
            tile_dir: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl TileSourceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ELEVATION_TILE_URL") {
            if !val.is_empty() {
                config.url_template = val;
            }
        }

        if let Ok(val) = std::env::var("ELEVATION_TILE_DIR") {
            if !val.is_empty() {
                config.tile_dir = Some(PathBuf::from(val));
            }
        }

        if let Ok(val) = std::env::var("TILE_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.request_timeout_secs = secs;
            }
        }

        if let Ok(val) = std::env::var("TILE_CONNECT_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.connect_timeout_secs = secs;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.tile_dir.is_none() && !is_tile_template(&self.url_template) {
            return Err(TileSourceError::InvalidTemplate(self.url_template.clone()));
        }

        if self.request_timeout_secs == 0 {
            return Err(TileSourceError::config("request_timeout_secs must be > 0"));
        }

        if self.connect_timeout_secs == 0 {
            return Err(TileSourceError::config("connect_timeout_secs must be > 0"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// True when `template` carries all three tile placeholders.
pub fn is_tile_template(template: &str) -> bool {
    ["{z}", "{x}", "{y}"].iter().all(|p| template.contains(p))
}
