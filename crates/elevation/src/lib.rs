//! Elevation data access for contour rendering.
//!
//! Elevation arrives as text DEM tiles (256×256 comma-separated cells per
//! tile) addressed by Web Mercator z/x/y. This crate provides:
//!
//! - **Tile sources**: an async [`TileSource`] contract with HTTP, local
//!   directory and in-memory implementations
//! - **Parsing**: [`parse_tile`] turns a payload into an [`ElevationMatrix`]
//! - **Stitching**: [`stitch`] and [`clip`] assemble adjacent tiles into
//!   one matrix covering exactly the requested pixel extent
//!
//! # Architecture
//!
//! ```text
//! Extent (tile range)
//!      │
//!      ▼
//! load_tile(source, z/x/y)  ── one future per tile, awaited together
//!      │
//!      ├─► Ok(Some(payload)) → parse_tile → ElevationMatrix (256×256)
//!      ├─► Ok(None)          → absent (no land in this tile)
//!      └─► Err(e)            → warn!, absent
//!      │
//!      ▼
//! stitch(tiles, extent) → tile-aligned mosaic
//!      │
//!      ▼
//! clip(mosaic, extent)  → pixel-extent matrix
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod source;

pub use config::{TileSourceConfig, DEFAULT_TILE_URL};
pub use error::{Result, TileSourceError};
pub use matrix::{
    clip, parse_tile, stitch, ElevationMatrix, ELEVATION_BIAS, NO_DATA_ELEVATION, NO_DATA_SENTINEL,
};
pub use source::{
    load_tile, source_from_config, DirectoryTileSource, HttpTileSource, LoadedTile, MemoryTileSource, TileSource,
};
