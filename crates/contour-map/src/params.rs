//! Geometry and elevation parameters shared by every map shape.

use contour_common::{extent, ContourError, ContourResult, Extent, GeoBoundingBox};
use serde::{Deserialize, Serialize};

/// Highest zoom level accepted. Tile indices stay well inside `u32` and
/// pixel coordinates inside `i64` up to here.
pub const MAX_ZOOM: u32 = 24;

/// Most contour levels one map may request.
pub const MAX_LEVELS: f64 = 10_000.0;

/// Most tiles one map may cover. The bulk mosaic for this many tiles is
/// 256 MiB of `f32`.
pub const MAX_TILES: i64 = 1024;

/// What to draw and how large.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapParams {
    pub bbox: GeoBoundingBox,
    pub zoom: u32,
    /// Lowest contour level (inclusive), metres.
    pub min_elevation: f32,
    /// Upper bound for contour levels (exclusive), metres.
    pub max_elevation: f32,
    /// Spacing between contour levels, metres.
    pub interval: f32,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl MapParams {
    pub fn validate(&self) -> ContourResult<()> {
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(ContourError::invalid_parameter(
                "interval",
                format!("must be > 0, got {}", self.interval),
            ));
        }

        for (param, value) in [
            ("min_elevation", self.min_elevation),
            ("max_elevation", self.max_elevation),
        ] {
            if !value.is_finite() {
                return Err(ContourError::invalid_parameter(
                    param,
                    format!("must be finite, got {}", value),
                ));
            }
        }

        if !(self.max_elevation > self.min_elevation) {
            return Err(ContourError::invalid_parameter(
                "max_elevation",
                format!(
                    "must be greater than min_elevation ({} <= {})",
                    self.max_elevation, self.min_elevation
                ),
            ));
        }

        let level_count =
            (self.max_elevation as f64 - self.min_elevation as f64) / self.interval as f64;
        if level_count > MAX_LEVELS {
            return Err(ContourError::invalid_parameter(
                "interval",
                format!(
                    "{} is too fine for {}..{}: {:.0} levels, at most {}",
                    self.interval, self.min_elevation, self.max_elevation, level_count, MAX_LEVELS
                ),
            ));
        }

        if self.width == 0 || self.height == 0 {
            return Err(ContourError::invalid_parameter(
                "size",
                format!("output must be non-empty, got {}x{}", self.width, self.height),
            ));
        }

        if self.zoom > MAX_ZOOM {
            return Err(ContourError::invalid_parameter(
                "zoom",
                format!("must be <= {}, got {}", MAX_ZOOM, self.zoom),
            ));
        }

        if !self.bbox.is_projectable() {
            return Err(ContourError::InvalidBbox(format!(
                "{:?} is outside the Web Mercator range",
                self.bbox
            )));
        }

        Ok(())
    }

    /// Validate and resolve the pixel/tile extent, rejecting extents that
    /// cover no pixels.
    pub fn resolve_extent(&self) -> ContourResult<Extent> {
        self.validate()?;
        let ext = extent(&self.bbox, self.zoom);
        if ext.pixel_width() <= 0 || ext.pixel_height() <= 0 {
            return Err(ContourError::EmptyExtent {
                zoom: self.zoom,
                width: ext.pixel_width(),
                height: ext.pixel_height(),
            });
        }

        let tiles = ext.tile_columns() * ext.tile_rows();
        if tiles > MAX_TILES {
            return Err(ContourError::invalid_parameter(
                "bbox",
                format!(
                    "covers {}x{} tiles at zoom {}, at most {} allowed",
                    ext.tile_columns(),
                    ext.tile_rows(),
                    self.zoom,
                    MAX_TILES
                ),
            ));
        }
        Ok(ext)
    }

    /// Output pixels per extent pixel on each axis.
    pub fn scale(&self, ext: &Extent) -> (f32, f32) {
        (
            self.width as f32 / ext.pixel_width() as f32,
            self.height as f32 / ext.pixel_height() as f32,
        )
    }
}
