//! Tests for isoline extraction.

use renderer::contour::{
    connect_segments, contour_levels, identity_ticks, march_squares, stretched_ticks, Contour,
    IsolineKernel, MarchingSquares, Point, ScalarField, Segment,
};
use test_utils::assert_approx_eq;
use test_utils::generators::{cone_field, step_field};

fn extract(data: &[f32], width: usize, height: usize, levels: &[f32]) -> Vec<Contour> {
    let field = ScalarField::new(data, width, height).unwrap();
    MarchingSquares
        .isolines(&field, &identity_ticks(width), &identity_ticks(height), levels)
        .unwrap()
}

// ============================================================================
// contour_levels tests
// ============================================================================

#[test]
fn test_contour_levels_half_open_range() {
    let levels = contour_levels(0.0, 200.0, 50.0, |_| true);
    assert_eq!(levels, vec![0.0, 50.0, 100.0, 150.0]);
}

#[test]
fn test_contour_levels_start_at_min() {
    let levels = contour_levels(25.0, 130.0, 50.0, |_| true);
    assert_eq!(levels, vec![25.0, 75.0, 125.0]);
}

#[test]
fn test_contour_levels_filtered() {
    let levels = contour_levels(0.0, 2000.0, 50.0, |elev| elev % 500.0 == 0.0);
    assert_eq!(levels, vec![0.0, 500.0, 1000.0, 1500.0]);
}

#[test]
fn test_contour_levels_invalid_input() {
    assert!(contour_levels(0.0, 100.0, 0.0, |_| true).is_empty());
    assert!(contour_levels(0.0, 100.0, -5.0, |_| true).is_empty());
    assert!(contour_levels(100.0, 100.0, 10.0, |_| true).is_empty());
    assert!(contour_levels(100.0, 0.0, 10.0, |_| true).is_empty());
}

#[test]
fn test_contour_levels_non_finite_bounds() {
    assert!(contour_levels(0.0, f32::INFINITY, 50.0, |_| true).is_empty());
    assert!(contour_levels(f32::NEG_INFINITY, 100.0, 50.0, |_| true).is_empty());
    assert!(contour_levels(f32::NAN, 100.0, 50.0, |_| true).is_empty());
    assert!(contour_levels(0.0, 100.0, f32::INFINITY, |_| true).is_empty());
}

#[test]
fn test_contour_levels_no_drift() {
    let levels = contour_levels(0.0, 4000.0, 0.1, |_| true);
    assert_eq!(levels.len(), 40_000);
    assert_approx_eq!(levels[39_999], 3999.9, 1e-3);
}

// ============================================================================
// march_squares tests
// ============================================================================

#[test]
fn test_march_squares_flat_field_has_no_segments() {
    let data = vec![10.0; 16];
    let field = ScalarField::new(&data, 4, 4).unwrap();
    assert!(march_squares(&field, 5.0).is_empty());
    assert!(march_squares(&field, 15.0).is_empty());
}

#[test]
fn test_march_squares_vertical_step() {
    let data = step_field(4, 3, 1, 0.0, 100.0);
    let field = ScalarField::new(&data, 4, 3).unwrap();
    let segments = march_squares(&field, 50.0);

    // One crossing per row of cells, halfway between columns 1 and 2
    assert_eq!(segments.len(), 2);
    for seg in &segments {
        assert_eq!(seg.start.x, 1.5);
        assert_eq!(seg.end.x, 1.5);
    }
}

#[test]
fn test_march_squares_skips_nan_cells() {
    let data = [0.0, f32::NAN, 100.0, 100.0];
    let field = ScalarField::new(&data, 2, 2).unwrap();
    assert!(march_squares(&field, 50.0).is_empty());
}

#[test]
fn test_scalar_field_rejects_bad_length() {
    assert!(ScalarField::new(&[0.0; 5], 2, 3).is_err());
}

// ============================================================================
// connect_segments tests
// ============================================================================

#[test]
fn test_connect_segments_joins_reversed_segments() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let c = Point::new(2.0, 0.0);
    let lines = connect_segments(vec![
        Segment { start: a, end: b },
        Segment { start: c, end: b },
    ]);
    assert_eq!(lines, vec![vec![a, b, c]]);
}

#[test]
fn test_connect_segments_keeps_components_apart() {
    let lines = connect_segments(vec![
        Segment { start: Point::new(0.0, 0.0), end: Point::new(1.0, 0.0) },
        Segment { start: Point::new(5.0, 5.0), end: Point::new(6.0, 5.0) },
    ]);
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_connect_segments_empty() {
    assert!(connect_segments(vec![]).is_empty());
}

// ============================================================================
// MarchingSquares kernel tests
// ============================================================================

#[test]
fn test_kernel_closed_ring_around_peak() {
    let data = cone_field(21, 21, 10.0, 10.0, 100.0, 10.0);
    let contours = extract(&data, 21, 21, &[55.0]);

    assert_eq!(contours.len(), 1);
    let ring = &contours[0];
    assert_eq!(ring.level, 55.0);
    assert!(ring.closed);
    assert_eq!(ring.points.first(), ring.points.last());

    for p in &ring.points {
        let r = ((p.x - 10.0).powi(2) + (p.y - 10.0).powi(2)).sqrt();
        assert!((4.0..5.0).contains(&r), "point {:?} at radius {}", p, r);
    }
}

#[test]
fn test_kernel_open_line_is_one_polyline() {
    let data = step_field(8, 6, 3, 10.0, 60.0);
    let contours = extract(&data, 8, 6, &[50.0]);

    assert_eq!(contours.len(), 1);
    let line = &contours[0];
    assert!(!line.closed);
    assert_eq!(line.points.len(), 6);
    // Consecutive points are one row apart
    for pair in line.points.windows(2) {
        assert_eq!((pair[1].y - pair[0].y).abs(), 1.0);
    }
}

#[test]
fn test_kernel_levels_ascending() {
    let data = cone_field(21, 21, 10.0, 10.0, 100.0, 10.0);
    let contours = extract(&data, 21, 21, &[25.0, 55.0, 85.0]);
    let levels: Vec<f32> = contours.iter().map(|c| c.level).collect();
    assert_eq!(levels, vec![25.0, 55.0, 85.0]);
}

#[test]
fn test_kernel_excluded_level_leaves_others_identical() {
    let data = cone_field(21, 21, 10.0, 10.0, 100.0, 10.0);
    let all = extract(&data, 21, 21, &contour_levels(0.0, 100.0, 25.0, |_| true));
    let sparse = extract(&data, 21, 21, &contour_levels(0.0, 100.0, 25.0, |l| l != 50.0));

    let kept: Vec<&Contour> = all.iter().filter(|c| c.level != 50.0).collect();
    assert_eq!(kept.len(), sparse.len());
    for (a, b) in kept.iter().zip(&sparse) {
        assert_eq!(*a, b);
    }
    assert!(sparse.iter().all(|c| c.level != 50.0));
}

#[test]
fn test_kernel_stretched_ticks_span_tile() {
    let data = step_field(256, 256, 127, 0.0, 100.0);
    let field = ScalarField::new(&data, 256, 256).unwrap();
    let ticks = stretched_ticks(256, 256.0);
    let contours = MarchingSquares.isolines(&field, &ticks, &ticks, &[50.0]).unwrap();

    assert_eq!(contours.len(), 1);
    let points = &contours[0].points;
    assert_eq!(points.first().unwrap().y, 0.0);
    assert_eq!(points.last().unwrap().y, 256.0);
    assert_approx_eq!(points[0].x, 127.5 * 256.0 / 255.0, 1e-3);
}

#[test]
fn test_kernel_rejects_mismatched_ticks() {
    let data = vec![0.0; 12];
    let field = ScalarField::new(&data, 4, 3).unwrap();
    let result = MarchingSquares.isolines(&field, &identity_ticks(3), &identity_ticks(3), &[1.0]);
    assert!(result.is_err());
}
