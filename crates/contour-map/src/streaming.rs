//! Per-tile contour map: each tile is contoured and drawn as it arrives.

use std::sync::Arc;

use contour_common::{ContourResult, RasterStyler, StrokeStyler, TILE_SIZE};
use elevation::{load_tile, ElevationMatrix, TileSource};
use futures::stream::{FuturesUnordered, StreamExt};
use renderer::{
    band_edges, blit_image, contour_levels, stretched_ticks, stroke_contours, IsolineKernel,
    MarchingSquares, Placement, ScalarField, Surface,
};
use tracing::{debug, instrument, trace};

use crate::params::MapParams;
use crate::stats::DrawStats;

/// Per-tile rendering strategy together with the style it needs.
#[derive(Clone)]
pub enum TileStyler {
    /// Vector isolines stroked per level.
    Vector(Arc<dyn StrokeStyler>),
    /// Raster band edges painted per pixel.
    Fast(Arc<dyn RasterStyler>),
}

impl TileStyler {
    pub fn is_fast(&self) -> bool {
        matches!(self, Self::Fast(_))
    }
}

/// Draws each tile independently into its slot of the shared canvas.
///
/// Tiles draw in fetch-completion order. Each tile is contoured against
/// its own samples only, so lines may not meet exactly at tile seams.
pub struct TileContourMap {
    params: MapParams,
    source: Arc<dyn TileSource>,
    styler: TileStyler,
    kernel: Arc<dyn IsolineKernel>,
}

impl TileContourMap {
    pub fn new(params: MapParams, source: Arc<dyn TileSource>, styler: TileStyler) -> Self {
        Self {
            params,
            source,
            styler,
            kernel: Arc::new(MarchingSquares),
        }
    }

    /// Replace the isoline kernel used in vector mode.
    pub fn with_kernel(mut self, kernel: Arc<dyn IsolineKernel>) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn params(&self) -> &MapParams {
        &self.params
    }

    pub fn styler(&self) -> &TileStyler {
        &self.styler
    }

    /// Draw onto `surface`, resizing it to the output size first.
    pub async fn draw<S>(&self, surface: &mut S) -> ContourResult<()>
    where
        S: Surface + ?Sized,
    {
        self.draw_with_stats(surface).await.map(|_| ())
    }

    #[instrument(skip_all, fields(zoom = self.params.zoom, fast = self.styler.is_fast()))]
    pub async fn draw_with_stats<S>(&self, surface: &mut S) -> ContourResult<DrawStats>
    where
        S: Surface + ?Sized,
    {
        let ext = self.params.resolve_extent()?;
        surface.set_size(self.params.width, self.params.height)?;
        let (sx, sy) = self.params.scale(&ext);

        let levels = match &self.styler {
            TileStyler::Vector(styler) => contour_levels(
                self.params.min_elevation,
                self.params.max_elevation,
                self.params.interval,
                |level| styler.style_for(level).is_some(),
            ),
            TileStyler::Fast(_) => Vec::new(),
        };
        let edge = TILE_SIZE as usize;
        let ticks = stretched_ticks(edge, TILE_SIZE as f32);

        let source = self.source.as_ref();
        let mut pending: FuturesUnordered<_> = ext
            .tiles()
            .into_iter()
            .map(|coord| load_tile(source, coord))
            .collect();

        let mut stats = DrawStats {
            tiles_requested: pending.len(),
            ..DrawStats::default()
        };

        while let Some(tile) = pending.next().await {
            stats.record_tile(tile.matrix.is_some());
            let Some(matrix) = tile.matrix else {
                continue;
            };

            let (ox, oy) = ext.region_offset(tile.coord.x, tile.coord.y);
            let placement = Placement::scaled(sx, sy).with_offset(ox as f32, oy as f32);
            trace!(tile = %tile.coord.key(), ox, oy, "Drawing tile");

            match &self.styler {
                TileStyler::Vector(styler) => {
                    stats.contours_drawn +=
                        self.draw_vector(surface, &matrix, &ticks, &levels, styler.as_ref(), &placement)?;
                }
                TileStyler::Fast(styler) => {
                    let field = field_of(&matrix)?;
                    let image = band_edges(&field, self.params.interval, styler.as_ref())?;
                    blit_image(surface, &image, &placement)?;
                    stats.images_drawn += 1;
                }
            }
        }

        debug!(%stats, "Tile contour map drawn");
        Ok(stats)
    }

    fn draw_vector<S>(
        &self,
        surface: &mut S,
        matrix: &ElevationMatrix,
        ticks: &[f32],
        levels: &[f32],
        styler: &dyn StrokeStyler,
        placement: &Placement,
    ) -> ContourResult<usize>
    where
        S: Surface + ?Sized,
    {
        let field = field_of(matrix)?;
        let contours = self.kernel.isolines(&field, ticks, ticks, levels)?;
        stroke_contours(surface, &contours, styler, placement)
    }
}

fn field_of(matrix: &ElevationMatrix) -> ContourResult<ScalarField<'_>> {
    ScalarField::new(matrix.values(), matrix.width(), matrix.height())
}
