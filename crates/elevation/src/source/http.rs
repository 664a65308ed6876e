//! HTTP tile source.

use std::time::Duration;

use async_trait::async_trait;
use contour_common::TileCoord;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use super::TileSource;
use crate::config::{is_tile_template, TileSourceConfig};
use crate::error::{Result, TileSourceError};

const USER_AGENT: &str = concat!("contour-map/", env!("CARGO_PKG_VERSION"));

/// Fetches tiles from a `{z}/{x}/{y}` URL template.
#[derive(Debug, Clone)]
pub struct HttpTileSource {
    client: Client,
    url_template: String,
}

impl HttpTileSource {
    /// Create a source with explicit timeouts.
    pub fn new(
        url_template: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let url_template = url_template.into();
        if !is_tile_template(&url_template) {
            return Err(TileSourceError::InvalidTemplate(url_template));
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .user_agent(USER_AGENT)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| TileSourceError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url_template,
        })
    }

    pub fn from_config(config: &TileSourceConfig) -> Result<Self> {
        Self::new(
            config.url_template.clone(),
            config.request_timeout(),
            config.connect_timeout(),
        )
    }

    /// URL of one tile.
    pub fn tile_url(&self, coord: TileCoord) -> String {
        self.url_template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

#[async_trait]
impl TileSource for HttpTileSource {
    #[instrument(skip(self), fields(tile = %coord.key()))]
    async fn fetch_tile(&self, coord: TileCoord) -> Result<Option<String>> {
        let url = self.tile_url(coord);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Tile response received");

        match status {
            StatusCode::OK => Ok(Some(response.text().await?)),
            // The DEM service publishes no tile where there is no land
            StatusCode::NOT_FOUND => Ok(None),
            other => Err(TileSourceError::HttpStatus {
                status: other.as_u16(),
                url,
            }),
        }
    }
}
