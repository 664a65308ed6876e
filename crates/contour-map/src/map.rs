//! Build the right map shape from a [`MapConfig`].

use std::sync::Arc;

use contour_common::ContourResult;
use elevation::TileSource;
use renderer::Surface;

use crate::bulk::BulkContourMap;
use crate::config::{MapConfig, RenderMode};
use crate::stats::DrawStats;
use crate::streaming::{TileContourMap, TileStyler};

/// A configured contour map, ready to draw.
pub enum ContourMap {
    Bulk(BulkContourMap),
    Tiled(TileContourMap),
}

impl ContourMap {
    /// Validate `config` and build the map shape its mode selects.
    pub fn from_config(config: &MapConfig, source: Arc<dyn TileSource>) -> ContourResult<Self> {
        config.validate()?;
        let params = config.params();
        let style = Arc::new(config.style.clone());

        Ok(match config.mode {
            RenderMode::Bulk => Self::Bulk(BulkContourMap::new(params, source, style)),
            RenderMode::Tiled => Self::Tiled(TileContourMap::new(
                params,
                source,
                TileStyler::Vector(style),
            )),
            RenderMode::Fast => Self::Tiled(TileContourMap::new(
                params,
                source,
                TileStyler::Fast(style),
            )),
        })
    }

    pub fn mode(&self) -> RenderMode {
        match self {
            Self::Bulk(_) => RenderMode::Bulk,
            Self::Tiled(map) if map.styler().is_fast() => RenderMode::Fast,
            Self::Tiled(_) => RenderMode::Tiled,
        }
    }

    pub async fn draw<S>(&self, surface: &mut S) -> ContourResult<DrawStats>
    where
        S: Surface + ?Sized,
    {
        match self {
            Self::Bulk(map) => map.draw_with_stats(surface).await,
            Self::Tiled(map) => map.draw_with_stats(surface).await,
        }
    }
}
