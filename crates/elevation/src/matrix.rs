//! Elevation matrices: tile payload parsing, stitching and clipping.
//!
//! Storage is row-major `f32` (`values[y * width + x]`). Accessors take
//! `(x, y)` so callers never deal with the layout directly.

use contour_common::{ContourError, ContourResult, Extent, TileCoord, TILE_SIZE};
use tracing::debug;

/// Cell marker meaning "no data" in a text DEM tile.
pub const NO_DATA_SENTINEL: &str = "e";

/// Elevation assigned to no-data and malformed cells before biasing.
pub const NO_DATA_ELEVATION: f32 = 0.0;

/// Offset added to every decoded cell so no sample sits exactly on an
/// integer contour level.
pub const ELEVATION_BIAS: f32 = 0.001;

const TILE_EDGE: usize = TILE_SIZE as usize;

/// A 2-D grid of elevations in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationMatrix {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl ElevationMatrix {
    /// A matrix where every cell holds the decoded no-data value.
    pub fn new(width: usize, height: usize) -> ContourResult<Self> {
        Self::filled(width, height, NO_DATA_ELEVATION + ELEVATION_BIAS)
    }

    /// # Errors
    /// `InvalidParameter` when `width * height` overflows.
    pub fn filled(width: usize, height: usize, value: f32) -> ContourResult<Self> {
        let cells = width.checked_mul(height).ok_or_else(|| {
            ContourError::invalid_parameter(
                "size",
                format!("{}x{} matrix is too large", width, height),
            )
        })?;
        Ok(Self {
            width,
            height,
            values: vec![value; cells],
        })
    }

    /// Wrap row-major values.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> ContourResult<Self> {
        if width.checked_mul(height) != Some(values.len()) {
            return Err(ContourError::invalid_parameter(
                "values",
                format!(
                    "expected {} values for {}x{}, got {}",
                    width * height,
                    width,
                    height,
                    values.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major cell values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Elevation at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        self.values[y * self.width + x]
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the matrix.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        self.values[y * self.width + x] = value;
    }

    /// Smallest and largest elevation, or `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().fold((f32::MAX, f32::MIN), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }))
    }

    /// Copy `src` into this matrix with its top-left cell at
    /// `(dst_x, dst_y)`. Only the overlapping part is copied; offsets may
    /// be negative.
    pub fn paste(&mut self, src: &ElevationMatrix, dst_x: i64, dst_y: i64) {
        let start_x = dst_x.max(0);
        let start_y = dst_y.max(0);
        let end_x = (dst_x + src.width as i64).min(self.width as i64);
        let end_y = (dst_y + src.height as i64).min(self.height as i64);

        if start_x >= end_x || start_y >= end_y {
            return;
        }

        let run = (end_x - start_x) as usize;
        for y in start_y..end_y {
            let src_row = (y - dst_y) as usize;
            let src_col = (start_x - dst_x) as usize;
            let src_idx = src_row * src.width + src_col;
            let dst_idx = y as usize * self.width + start_x as usize;
            self.values[dst_idx..dst_idx + run].copy_from_slice(&src.values[src_idx..src_idx + run]);
        }
    }

    /// The `width`×`height` window whose top-left cell is `(x, y)`.
    /// Parts of the window outside this matrix hold the no-data value.
    pub fn window(&self, x: i64, y: i64, width: usize, height: usize) -> ContourResult<ElevationMatrix> {
        let mut out = ElevationMatrix::new(width, height)?;
        out.paste(self, -x, -y);
        Ok(out)
    }
}

/// Parse a text DEM tile into a 256×256 matrix.
///
/// Numeric cells are rounded to the nearest metre (halves round up) and
/// biased by [`ELEVATION_BIAS`]. The no-data sentinel and anything that
/// fails to parse decode to [`NO_DATA_ELEVATION`] plus the bias. Missing
/// rows or cells are padded the same way and anything past 256 is ignored.
pub fn parse_tile(payload: &str) -> ElevationMatrix {
    let mut matrix = ElevationMatrix {
        width: TILE_EDGE,
        height: TILE_EDGE,
        values: vec![NO_DATA_ELEVATION + ELEVATION_BIAS; TILE_EDGE * TILE_EDGE],
    };
    let mut malformed = 0usize;

    for (y, row) in payload.lines().take(TILE_EDGE).enumerate() {
        for (x, cell) in row.split(',').take(TILE_EDGE).enumerate() {
            let cell = cell.trim();
            if cell == NO_DATA_SENTINEL {
                continue;
            }
            match cell.parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    matrix.set(x, y, (v + 0.5).floor() as f32 + ELEVATION_BIAS);
                }
                _ => malformed += 1,
            }
        }
    }

    if malformed > 0 {
        debug!(malformed, "Coerced malformed tile cells to no-data");
    }

    matrix
}

/// Assemble tiles into the tile-aligned mosaic covering `extent`.
///
/// Each tile lands at `(tx - min_tile_x) * 256, (ty - min_tile_y) * 256`.
/// Regions with no tile keep the no-data value. Callers bound the extent;
/// a mosaic too large to address is an error.
pub fn stitch(tiles: &[(TileCoord, ElevationMatrix)], extent: &Extent) -> ContourResult<ElevationMatrix> {
    let width = (extent.tile_columns() * TILE_SIZE).max(0) as usize;
    let height = (extent.tile_rows() * TILE_SIZE).max(0) as usize;
    let mut mosaic = ElevationMatrix::new(width, height)?;

    for (coord, tile) in tiles {
        let (x, y) = extent.mosaic_offset(coord.x, coord.y);
        mosaic.paste(tile, x, y);
    }

    Ok(mosaic)
}

/// Cut the exact pixel extent out of a stitched mosaic.
pub fn clip(mosaic: &ElevationMatrix, extent: &Extent) -> ContourResult<ElevationMatrix> {
    let (x0, y0) = extent.clip_origin();
    let width = extent.pixel_width().max(0) as usize;
    let height = extent.pixel_height().max(0) as usize;
    mosaic.window(x0, y0, width, height)
}
