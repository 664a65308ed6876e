//! Tile source trait and implementations.
//!
//! A source returns the raw text payload of one tile. Absence ("no tile
//! at this address", which the DEM service uses for open sea) is a
//! normal `Ok(None)`; everything else that goes wrong is an error.
//! [`load_tile`] is the single place that folds both outcomes into
//! "no data" so that one bad tile never aborts a map.

mod directory;
mod http;
mod memory;

pub use directory::DirectoryTileSource;
pub use http::HttpTileSource;
pub use memory::MemoryTileSource;

use std::sync::Arc;

use async_trait::async_trait;
use contour_common::TileCoord;
use tracing::{debug, warn};

use crate::config::TileSourceConfig;
use crate::error::Result;
use crate::matrix::{parse_tile, ElevationMatrix};

/// Asynchronous access to raw elevation tile payloads.
#[async_trait]
pub trait TileSource: Send + Sync {
    /// Fetch the payload of one tile.
    ///
    /// # Returns
    /// * `Ok(Some(payload))` when the tile exists
    /// * `Ok(None)` when the source has no tile at `coord`
    async fn fetch_tile(&self, coord: TileCoord) -> Result<Option<String>>;
}

/// Outcome of loading one tile.
#[derive(Debug, Clone)]
pub struct LoadedTile {
    pub coord: TileCoord,
    /// Parsed elevations, or `None` when the tile is absent or failed.
    pub matrix: Option<ElevationMatrix>,
}

impl LoadedTile {
    pub fn is_absent(&self) -> bool {
        self.matrix.is_none()
    }
}

/// Fetch and parse one tile, degrading every failure to "no data".
///
/// Transport errors are logged with the tile key and otherwise treated
/// like a missing tile. There is no retry.
pub async fn load_tile<S>(source: &S, coord: TileCoord) -> LoadedTile
where
    S: TileSource + ?Sized,
{
    let matrix = match source.fetch_tile(coord).await {
        Ok(Some(payload)) => Some(parse_tile(&payload)),
        Ok(None) => {
            debug!(tile = %coord.key(), "Tile not found, treating as no data");
            None
        }
        Err(e) => {
            warn!(tile = %coord.key(), error = %e, "Tile fetch failed, treating as no data");
            None
        }
    };

    LoadedTile { coord, matrix }
}

/// Build the source a configuration describes: the local directory when
/// one is set, otherwise HTTP.
pub fn source_from_config(config: &TileSourceConfig) -> Result<Arc<dyn TileSource>> {
    config.validate()?;
    match &config.tile_dir {
        Some(dir) => Ok(Arc::new(DirectoryTileSource::new(dir.clone()))),
        None => Ok(Arc::new(HttpTileSource::from_config(config)?)),
    }
}
