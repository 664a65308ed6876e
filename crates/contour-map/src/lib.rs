//! Contour map orchestration.
//!
//! Two map shapes share one set of parameters:
//!
//! - [`BulkContourMap`] fetches every covering tile, stitches and clips
//!   them, contours the result once and strokes it onto the surface.
//! - [`TileContourMap`] draws each tile into its slot as soon as it is
//!   fetched, either as vector isolines or as raster band edges.
//!
//! [`ContourMap::from_config`] picks one from a [`MapConfig`].

pub mod bulk;
pub mod config;
pub mod map;
pub mod params;
pub mod stats;
pub mod streaming;

pub use bulk::BulkContourMap;
pub use config::{MapConfig, RenderMode};
pub use map::ContourMap;
pub use params::{MapParams, MAX_LEVELS, MAX_TILES, MAX_ZOOM};
pub use stats::DrawStats;
pub use streaming::{TileContourMap, TileStyler};
