//! Common types and utilities shared across the contour map crates.

pub mod bbox;
pub mod error;
pub mod style;
pub mod tile;

pub use bbox::GeoBoundingBox;
pub use error::{ContourError, ContourResult};
pub use style::{
    ContourStyle, DefaultRasterStyle, DefaultStrokeStyle, RasterStyler, Rgba, StrokeStyle,
    StrokeStyler,
};
pub use tile::{extent, pixel_coordinate, tile_coordinate, Extent, PixelCoord, TileCoord, TILE_SIZE};
