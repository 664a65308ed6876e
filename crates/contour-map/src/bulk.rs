//! Single-pass contour map: stitch every tile, contour once.

use std::sync::Arc;

use contour_common::{ContourResult, StrokeStyler};
use elevation::{clip, load_tile, stitch, TileSource};
use futures::future::join_all;
use renderer::{
    contour_levels, identity_ticks, stroke_contours, IsolineKernel, MarchingSquares, Placement,
    ScalarField, Surface,
};
use tracing::{debug, instrument};

use crate::params::MapParams;
use crate::stats::DrawStats;

/// Contours the whole region in one pass.
///
/// Every covering tile is fetched concurrently and the draw waits for all
/// of them, so lines run across tile seams without breaks. The full
/// stitched matrix is held in memory.
pub struct BulkContourMap {
    params: MapParams,
    source: Arc<dyn TileSource>,
    styler: Arc<dyn StrokeStyler>,
    kernel: Arc<dyn IsolineKernel>,
}

impl BulkContourMap {
    pub fn new(params: MapParams, source: Arc<dyn TileSource>, styler: Arc<dyn StrokeStyler>) -> Self {
        Self {
            params,
            source,
            styler,
            kernel: Arc::new(MarchingSquares),
        }
    }

    /// Replace the isoline kernel.
    pub fn with_kernel(mut self, kernel: Arc<dyn IsolineKernel>) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn params(&self) -> &MapParams {
        &self.params
    }

    /// Draw onto `surface`, resizing it to the output size first.
    pub async fn draw<S>(&self, surface: &mut S) -> ContourResult<()>
    where
        S: Surface + ?Sized,
    {
        self.draw_with_stats(surface).await.map(|_| ())
    }

    #[instrument(skip_all, fields(zoom = self.params.zoom, mode = "bulk"))]
    pub async fn draw_with_stats<S>(&self, surface: &mut S) -> ContourResult<DrawStats>
    where
        S: Surface + ?Sized,
    {
        let ext = self.params.resolve_extent()?;
        surface.set_size(self.params.width, self.params.height)?;
        let (sx, sy) = self.params.scale(&ext);

        let coords = ext.tiles();
        let mut stats = DrawStats {
            tiles_requested: coords.len(),
            ..DrawStats::default()
        };

        let source = self.source.as_ref();
        let loaded = join_all(coords.iter().map(|&coord| load_tile(source, coord))).await;

        let mut tiles = Vec::with_capacity(loaded.len());
        for tile in loaded {
            stats.record_tile(tile.matrix.is_some());
            if let Some(matrix) = tile.matrix {
                tiles.push((tile.coord, matrix));
            }
        }

        let matrix = clip(&stitch(&tiles, &ext)?, &ext)?;
        drop(tiles);
        debug!(
            width = matrix.width(),
            height = matrix.height(),
            range = ?matrix.min_max(),
            "Stitched elevation matrix"
        );

        let styler = self.styler.as_ref();
        let levels = contour_levels(
            self.params.min_elevation,
            self.params.max_elevation,
            self.params.interval,
            |level| styler.style_for(level).is_some(),
        );

        let field = ScalarField::new(matrix.values(), matrix.width(), matrix.height())?;
        let contours = self.kernel.isolines(
            &field,
            &identity_ticks(matrix.width()),
            &identity_ticks(matrix.height()),
            &levels,
        )?;

        stats.contours_drawn = stroke_contours(surface, &contours, styler, &Placement::scaled(sx, sy))?;

        debug!(%stats, levels = levels.len(), "Bulk contour map drawn");
        Ok(stats)
    }
}
