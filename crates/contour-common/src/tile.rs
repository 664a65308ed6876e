//! Web Mercator tile addressing.
//!
//! Pixel coordinates are global "world pixel" positions at a zoom level,
//! with the origin at the top-left of the world. A tile covers
//! [`TILE_SIZE`] × [`TILE_SIZE`] pixels.

use crate::GeoBoundingBox;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Width and height of a tile in pixels.
pub const TILE_SIZE: i64 = 256;

/// A tile coordinate (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Key string used in URLs, paths and log fields.
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.z, self.x, self.y)
    }

    /// Number of tiles along one axis at this zoom level.
    pub fn tiles_per_axis(zoom: u32) -> i64 {
        1i64 << zoom
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A world pixel coordinate at some zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: i64,
    pub y: i64,
}

/// Project a geographic point to world pixel coordinates.
///
/// Uses the spherical Mercator forward projection on a 256-pixel world at
/// zoom 0, scaled by `2^zoom` and floored. Latitude is not clamped: inputs
/// outside roughly ±85.05° give meaningless (possibly infinite) results.
pub fn pixel_coordinate(lat: f64, lon: f64, zoom: u32) -> PixelCoord {
    let lat_rad = lat.to_radians();
    let lon_rad = lon.to_radians();
    let r = 128.0 / PI;

    let world_x = r * (lon_rad + PI);
    let sin_lat = lat_rad.sin();
    let world_y = -r / 2.0 * ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() + 128.0;

    let scale = 2f64.powi(zoom as i32);
    PixelCoord {
        x: (world_x * scale).floor() as i64,
        y: (world_y * scale).floor() as i64,
    }
}

/// Tile index containing a pixel (floor division by the tile size).
pub fn tile_coordinate(pixel: PixelCoord) -> (i64, i64) {
    (pixel.x.div_euclid(TILE_SIZE), pixel.y.div_euclid(TILE_SIZE))
}

/// Pixel and tile ranges covering a bounding box at one zoom level.
///
/// Pixel maxima are exclusive bounds of the region to render; tile maxima
/// are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub zoom: u32,
    pub min_pixel_x: i64,
    pub min_pixel_y: i64,
    pub max_pixel_x: i64,
    pub max_pixel_y: i64,
    pub min_tile_x: i64,
    pub min_tile_y: i64,
    pub max_tile_x: i64,
    pub max_tile_y: i64,
}

/// Resolve the extent of a bounding box.
///
/// Both corners are projected independently and combined component-wise,
/// so corner order (and the Y inversion of the projection) never yields
/// an inverted extent.
pub fn extent(bbox: &GeoBoundingBox, zoom: u32) -> Extent {
    let a = pixel_coordinate(bbox.min_lat, bbox.min_lon, zoom);
    let b = pixel_coordinate(bbox.max_lat, bbox.max_lon, zoom);
    let (a_tx, a_ty) = tile_coordinate(a);
    let (b_tx, b_ty) = tile_coordinate(b);

    Extent {
        zoom,
        min_pixel_x: a.x.min(b.x),
        min_pixel_y: a.y.min(b.y),
        max_pixel_x: a.x.max(b.x),
        max_pixel_y: a.y.max(b.y),
        min_tile_x: a_tx.min(b_tx),
        min_tile_y: a_ty.min(b_ty),
        max_tile_x: a_tx.max(b_tx),
        max_tile_y: a_ty.max(b_ty),
    }
}

impl Extent {
    /// Width of the pixel region.
    pub fn pixel_width(&self) -> i64 {
        self.max_pixel_x - self.min_pixel_x
    }

    /// Height of the pixel region.
    pub fn pixel_height(&self) -> i64 {
        self.max_pixel_y - self.min_pixel_y
    }

    /// Number of tile columns covered.
    pub fn tile_columns(&self) -> i64 {
        self.max_tile_x - self.min_tile_x + 1
    }

    /// Number of tile rows covered.
    pub fn tile_rows(&self) -> i64 {
        self.max_tile_y - self.min_tile_y + 1
    }

    /// Offset of the pixel region inside the tile-aligned mosaic.
    pub fn clip_origin(&self) -> (i64, i64) {
        (
            self.min_pixel_x - self.min_tile_x * TILE_SIZE,
            self.min_pixel_y - self.min_tile_y * TILE_SIZE,
        )
    }

    /// Pixel offset of a tile relative to the top-left of the mosaic.
    pub fn mosaic_offset(&self, tile_x: u32, tile_y: u32) -> (i64, i64) {
        (
            (tile_x as i64 - self.min_tile_x) * TILE_SIZE,
            (tile_y as i64 - self.min_tile_y) * TILE_SIZE,
        )
    }

    /// Pixel offset of a tile relative to the top-left of the pixel region.
    /// Negative when the tile starts before the region.
    pub fn region_offset(&self, tile_x: u32, tile_y: u32) -> (i64, i64) {
        (
            tile_x as i64 * TILE_SIZE - self.min_pixel_x,
            tile_y as i64 * TILE_SIZE - self.min_pixel_y,
        )
    }

    /// Every tile covering the extent in column-major order (x outer, y
    /// inner). Indices outside the world tile grid are skipped.
    pub fn tiles(&self) -> Vec<TileCoord> {
        let n = TileCoord::tiles_per_axis(self.zoom);
        let mut tiles = Vec::new();
        for x in self.min_tile_x.max(0)..=self.max_tile_x.min(n - 1) {
            for y in self.min_tile_y.max(0)..=self.max_tile_y.min(n - 1) {
                tiles.push(TileCoord::new(self.zoom, x as u32, y as u32));
            }
        }
        tiles
    }
}
