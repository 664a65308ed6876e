//! End-to-end tests for the bulk and per-tile contour maps.

use std::sync::Arc;

use contour_common::{
    ContourError, ContourResult, ContourStyle, GeoBoundingBox, StrokeStyle, TileCoord,
    TILE_SIZE,
};
use contour_map::{
    BulkContourMap, ContourMap, MapConfig, MapParams, RenderMode, TileContourMap, TileStyler,
};
use elevation::{DirectoryTileSource, MemoryTileSource, TileSource};
use renderer::{DestRect, PixmapSurface, RgbaImage, Surface};
use test_utils::{
    assert_approx_eq, bbox, cone_tile_payload, levels, no_data_tile_payload, temp_test_dir,
    write_tile_file,
};

// Hachimantai at zoom 12 covers tiles x 3651..=3652, y 1552..=1553 and the
// pixel region starting at (934834, 397348).
const MIN_TILE: (u32, u32) = (3651, 1552);
const REGION_ORIGIN: (i64, i64) = (934834, 397348);
const PEAK_AT: (i64, i64) = (934980, 397540);

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Size(u32, u32),
    Style(f32),
    Stroke(usize),
    Image(DestRect),
}

/// Records drawing calls instead of rasterising them.
#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Call>,
    points: usize,
}

impl RecordingSurface {
    fn strokes(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Stroke(_))).count()
    }

    fn images(&self) -> Vec<DestRect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Image(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn set_size(&mut self, width: u32, height: u32) -> ContourResult<()> {
        self.calls.push(Call::Size(width, height));
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (0, 0)
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) {
        self.calls.push(Call::Style(style.width));
    }

    fn begin_path(&mut self) {
        self.points = 0;
    }

    fn move_to(&mut self, _x: f32, _y: f32) {
        self.points += 1;
    }

    fn line_to(&mut self, _x: f32, _y: f32) {
        self.points += 1;
    }

    fn stroke(&mut self) -> ContourResult<()> {
        self.calls.push(Call::Stroke(self.points));
        Ok(())
    }

    fn draw_image(&mut self, _image: &RgbaImage, dest: DestRect) -> ContourResult<()> {
        self.calls.push(Call::Image(dest));
        Ok(())
    }
}

fn hachimantai() -> GeoBoundingBox {
    let (min_lat, min_lon, max_lat, max_lon) = bbox::HACHIMANTAI;
    GeoBoundingBox::new(min_lat, min_lon, max_lat, max_lon)
}

fn params() -> MapParams {
    MapParams {
        bbox: hachimantai(),
        zoom: levels::ZOOM,
        min_elevation: levels::MIN_ELEVATION,
        max_elevation: levels::MAX_ELEVATION,
        interval: levels::INTERVAL,
        width: levels::OUTPUT_SIZE,
        height: levels::OUTPUT_SIZE,
    }
}

fn coord(dx: u32, dy: u32) -> TileCoord {
    TileCoord::new(levels::ZOOM, MIN_TILE.0 + dx, MIN_TILE.1 + dy)
}

fn mountain_tile(c: TileCoord) -> String {
    let origin = (c.x as i64 * TILE_SIZE, c.y as i64 * TILE_SIZE);
    cone_tile_payload(origin, PEAK_AT, 1200.0, 3.0)
}

/// All four tiles except the south-east one, which is missing.
fn mountain_source() -> MemoryTileSource {
    let mut source = MemoryTileSource::new();
    for (dx, dy) in [(0, 0), (0, 1), (1, 0)] {
        let c = coord(dx, dy);
        source.insert(c, mountain_tile(c));
    }
    source
}

fn style() -> Arc<ContourStyle> {
    Arc::new(ContourStyle::default())
}

async fn render_pixels(map: &ContourMap) -> RgbaImage {
    let mut surface = PixmapSurface::new(1, 1).unwrap();
    map.draw(&mut surface).await.unwrap();
    surface.to_rgba()
}

// ============================================================================
// Bulk map
// ============================================================================

#[tokio::test]
async fn test_bulk_draws_with_missing_tile() {
    let map = BulkContourMap::new(params(), Arc::new(mountain_source()), style());
    let mut surface = RecordingSurface::default();

    let stats = map.draw_with_stats(&mut surface).await.unwrap();

    assert_eq!(surface.calls.first(), Some(&Call::Size(400, 400)));
    assert_eq!(stats.tiles_requested, 4);
    assert_eq!(stats.tiles_loaded, 3);
    assert_eq!(stats.tiles_absent, 1);
    assert_eq!(stats.images_drawn, 0);
    assert!(stats.contours_drawn > 0);
    assert_eq!(stats.contours_drawn, surface.strokes());
}

#[tokio::test]
async fn test_bulk_failing_tile_counts_as_absent() {
    let source = mountain_source().with_failure(coord(1, 1), 503);
    let map = BulkContourMap::new(params(), Arc::new(source), style());
    let mut surface = RecordingSurface::default();

    let stats = map.draw_with_stats(&mut surface).await.unwrap();

    assert_eq!(stats.tiles_absent, 1);
    assert!(stats.contours_drawn > 0);
}

#[tokio::test]
async fn test_bulk_is_deterministic() {
    let config = MapConfig {
        bbox: hachimantai(),
        ..MapConfig::default()
    };
    let map = ContourMap::from_config(&config, Arc::new(mountain_source())).unwrap();

    let first = render_pixels(&map).await;
    let second = render_pixels(&map).await;

    assert_eq!(first.width(), 400);
    assert_eq!(first.height(), 400);
    assert!(first.opaque_pixel_count() > 0);
    assert_eq!(first.data(), second.data());
}

#[tokio::test]
async fn test_no_data_region_stays_transparent() {
    let mut source = MemoryTileSource::new();
    for (dx, dy) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        source.insert(coord(dx, dy), no_data_tile_payload());
    }
    let source: Arc<dyn TileSource> = Arc::new(source);

    for mode in [RenderMode::Bulk, RenderMode::Tiled, RenderMode::Fast] {
        let config = MapConfig {
            bbox: hachimantai(),
            mode,
            ..MapConfig::default()
        };
        let map = ContourMap::from_config(&config, source.clone()).unwrap();
        let image = render_pixels(&map).await;
        assert_eq!(image.opaque_pixel_count(), 0, "mode {}", mode);
    }
}

#[tokio::test]
async fn test_empty_source_draws_nothing() {
    let map = BulkContourMap::new(params(), Arc::new(MemoryTileSource::new()), style());
    let mut surface = RecordingSurface::default();

    let stats = map.draw_with_stats(&mut surface).await.unwrap();

    assert_eq!(stats.tiles_absent, 4);
    assert_eq!(stats.contours_drawn, 0);
    assert_eq!(surface.calls, vec![Call::Size(400, 400)]);
}

#[tokio::test]
async fn test_excluded_levels_match_sparser_interval() {
    let source: Arc<dyn TileSource> = Arc::new(mountain_source());

    let major_only = MapConfig {
        bbox: hachimantai(),
        interval: 50.0,
        style: ContourStyle {
            major_only: true,
            ..ContourStyle::default()
        },
        ..MapConfig::default()
    };
    let sparse = MapConfig {
        bbox: hachimantai(),
        interval: 500.0,
        ..MapConfig::default()
    };

    let a = render_pixels(&ContourMap::from_config(&major_only, source.clone()).unwrap()).await;
    let b = render_pixels(&ContourMap::from_config(&sparse, source).unwrap()).await;

    assert!(a.opaque_pixel_count() > 0);
    assert_eq!(a.data(), b.data());
}

#[tokio::test]
async fn test_bulk_from_tile_directory() {
    let dir = temp_test_dir();
    for (dx, dy) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        let c = coord(dx, dy);
        write_tile_file(dir.path(), c.z, c.x, c.y, &mountain_tile(c));
    }
    let source = Arc::new(DirectoryTileSource::new(dir.path().to_path_buf()));
    let map = BulkContourMap::new(params(), source, style());
    let mut surface = RecordingSurface::default();

    let stats = map.draw_with_stats(&mut surface).await.unwrap();

    assert_eq!(stats.tiles_loaded, 4);
    assert!(stats.contours_drawn > 0);
}

// ============================================================================
// Per-tile map
// ============================================================================

#[tokio::test]
async fn test_tiled_vector_draws_each_tile() {
    let map = TileContourMap::new(
        params(),
        Arc::new(mountain_source()),
        TileStyler::Vector(style()),
    );
    let mut surface = RecordingSurface::default();

    let stats = map.draw_with_stats(&mut surface).await.unwrap();

    assert_eq!(surface.calls.first(), Some(&Call::Size(400, 400)));
    assert_eq!(stats.tiles_loaded, 3);
    assert_eq!(stats.tiles_absent, 1);
    assert!(stats.contours_drawn > 0);
    assert_eq!(stats.contours_drawn, surface.strokes());
    assert!(surface.images().is_empty());
}

#[tokio::test]
async fn test_fast_places_one_image_per_loaded_tile() {
    let map = TileContourMap::new(
        params(),
        Arc::new(mountain_source()),
        TileStyler::Fast(style()),
    );
    let mut surface = RecordingSurface::default();

    let stats = map.draw_with_stats(&mut surface).await.unwrap();
    let images = surface.images();

    assert_eq!(stats.images_drawn, 3);
    assert_eq!(images.len(), 3);
    assert_eq!(surface.strokes(), 0);

    let sx = 400.0 / 291.0;
    let sy = 400.0 / 380.0;
    let origin_x = (MIN_TILE.0 as i64 * TILE_SIZE - REGION_ORIGIN.0) as f32;
    let origin_y = (MIN_TILE.1 as i64 * TILE_SIZE - REGION_ORIGIN.1) as f32;

    let top_left = images
        .iter()
        .find(|r| r.x < 0.0 && r.y < 0.0)
        .expect("north-west tile image");
    assert_approx_eq!(top_left.x, origin_x * sx, 1e-3);
    assert_approx_eq!(top_left.y, origin_y * sy, 1e-3);
    assert_approx_eq!(top_left.width, 256.0 * sx, 1e-3);
    assert_approx_eq!(top_left.height, 256.0 * sy, 1e-3);
}

#[tokio::test]
async fn test_fast_mode_paints_pixels() {
    let config = MapConfig {
        bbox: hachimantai(),
        mode: RenderMode::Fast,
        ..MapConfig::default()
    };
    let map = ContourMap::from_config(&config, Arc::new(mountain_source())).unwrap();
    assert_eq!(map.mode(), RenderMode::Fast);

    let image = render_pixels(&map).await;
    assert!(image.opaque_pixel_count() > 0);
}

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn test_from_config_picks_mode() {
    let source: Arc<dyn TileSource> = Arc::new(MemoryTileSource::new());
    for mode in [RenderMode::Bulk, RenderMode::Tiled, RenderMode::Fast] {
        let config = MapConfig {
            mode,
            ..MapConfig::default()
        };
        let map = ContourMap::from_config(&config, source.clone()).unwrap();
        assert_eq!(map.mode(), mode);
    }
}

#[test]
fn test_from_config_rejects_invalid_parameters() {
    let source: Arc<dyn TileSource> = Arc::new(MemoryTileSource::new());

    let zero_interval = MapConfig {
        interval: 0.0,
        ..MapConfig::default()
    };
    assert!(matches!(
        ContourMap::from_config(&zero_interval, source.clone()),
        Err(ContourError::InvalidParameter { .. })
    ));

    let inverted = MapConfig {
        min_elevation: 100.0,
        max_elevation: 100.0,
        ..MapConfig::default()
    };
    assert!(ContourMap::from_config(&inverted, source.clone()).is_err());

    let no_pixels = MapConfig {
        width: 0,
        ..MapConfig::default()
    };
    assert!(ContourMap::from_config(&no_pixels, source.clone()).is_err());

    let unbounded = MapConfig::from_yaml_str("max_elevation: .inf").unwrap();
    assert!(matches!(
        ContourMap::from_config(&unbounded, source.clone()),
        Err(ContourError::InvalidParameter { .. })
    ));

    let too_fine = MapConfig {
        interval: 1e-5,
        ..MapConfig::default()
    };
    assert!(ContourMap::from_config(&too_fine, source).is_err());
}

#[tokio::test]
async fn test_oversized_extent_fails_before_drawing() {
    let config = MapConfig {
        bbox: GeoBoundingBox::new(0.0, 0.0, 10.0, 10.0),
        zoom: 16,
        ..MapConfig::default()
    };
    let map = ContourMap::from_config(&config, Arc::new(MemoryTileSource::new())).unwrap();
    let mut surface = RecordingSurface::default();

    let err = map.draw(&mut surface).await.unwrap_err();

    assert!(matches!(err, ContourError::InvalidParameter { .. }));
    assert!(surface.calls.is_empty());
}

#[tokio::test]
async fn test_degenerate_bbox_is_empty_extent() {
    let point = GeoBoundingBox::new(39.85, 141.0, 39.85, 141.0);
    let map = BulkContourMap::new(
        MapParams {
            bbox: point,
            ..params()
        },
        Arc::new(MemoryTileSource::new()),
        style(),
    );
    let mut surface = RecordingSurface::default();

    let err = map.draw(&mut surface).await.unwrap_err();

    assert!(matches!(err, ContourError::EmptyExtent { .. }));
    assert!(surface.calls.is_empty());
}
