//! Contour line (isoline) extraction using the marching squares algorithm.
//!
//! The extractor sits behind the [`IsolineKernel`] trait: given a scalar
//! field, one tick array per axis and an ascending list of levels it
//! returns ordered polylines tagged with their level. [`MarchingSquares`]
//! is the built-in kernel.

use std::collections::HashMap;

use contour_common::{ContourError, ContourResult};
use rayon::prelude::*;

/// A point in 2D space (pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn key(self) -> (u32, u32) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// A complete contour line (polyline).
///
/// A closed ring repeats its first point at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub level: f32,
    pub points: Vec<Point>,
    pub closed: bool,
}

/// A borrowed row-major grid of samples.
#[derive(Debug, Clone, Copy)]
pub struct ScalarField<'a> {
    data: &'a [f32],
    width: usize,
    height: usize,
}

impl<'a> ScalarField<'a> {
    pub fn new(data: &'a [f32], width: usize, height: usize) -> ContourResult<Self> {
        if data.len() != width * height {
            return Err(ContourError::invalid_parameter(
                "field",
                format!("{}x{} field needs {} samples, got {}", width, height, width * height, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &'a [f32] {
        self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}

/// Turns a scalar field into per-level polylines.
pub trait IsolineKernel: Send + Sync {
    /// Extract isolines for `levels`.
    ///
    /// Points are reported in tick space: sample `(i, j)` maps to
    /// `(x_ticks[i], y_ticks[j])`, positions between samples are
    /// interpolated linearly. Tick arrays must match the field dimensions.
    fn isolines(
        &self,
        field: &ScalarField<'_>,
        x_ticks: &[f32],
        y_ticks: &[f32],
        levels: &[f32],
    ) -> ContourResult<Vec<Contour>>;
}

/// Marching squares with linear edge interpolation and centre-value
/// saddle disambiguation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarchingSquares;

impl IsolineKernel for MarchingSquares {
    fn isolines(
        &self,
        field: &ScalarField<'_>,
        x_ticks: &[f32],
        y_ticks: &[f32],
        levels: &[f32],
    ) -> ContourResult<Vec<Contour>> {
        if x_ticks.len() != field.width() || y_ticks.len() != field.height() {
            return Err(ContourError::invalid_parameter(
                "ticks",
                format!(
                    "expected {}x{} ticks, got {}x{}",
                    field.width(),
                    field.height(),
                    x_ticks.len(),
                    y_ticks.len()
                ),
            ));
        }

        // Levels are independent; collect keeps them in ascending order
        let contours = levels
            .par_iter()
            .flat_map_iter(move |&level| {
                connect_segments(march_squares(field, level))
                    .into_iter()
                    .map(move |points| {
                        let closed = points.len() > 2 && points.first() == points.last();
                        Contour {
                            level,
                            points: points
                                .into_iter()
                                .map(|p| Point::new(map_tick(x_ticks, p.x), map_tick(y_ticks, p.y)))
                                .collect(),
                            closed,
                        }
                    })
            })
            .collect();

        Ok(contours)
    }
}

/// Ticks where sample index equals coordinate.
pub fn identity_ticks(count: usize) -> Vec<f32> {
    (0..count).map(|i| i as f32).collect()
}

/// Ticks stretching `count` samples over `span` pixels, first sample at 0
/// and last at `span`.
pub fn stretched_ticks(count: usize, span: f32) -> Vec<f32> {
    if count < 2 {
        return vec![0.0; count];
    }
    let last = (count - 1) as f32;
    (0..count).map(|i| span * i as f32 / last).collect()
}

fn map_tick(ticks: &[f32], pos: f32) -> f32 {
    let i = (pos.floor() as usize).min(ticks.len().saturating_sub(1));
    let frac = pos - i as f32;
    if frac == 0.0 || i + 1 >= ticks.len() {
        return ticks[i];
    }
    ticks[i] + frac * (ticks[i + 1] - ticks[i])
}

/// Levels `min + i * interval` below `max`, keeping those `keep` accepts.
///
/// An excluded level never reaches the kernel. Non-finite bounds or
/// interval yield no levels.
pub fn contour_levels(min: f32, max: f32, interval: f32, keep: impl Fn(f32) -> bool) -> Vec<f32> {
    if !(min.is_finite() && max.is_finite() && interval.is_finite()) {
        return vec![];
    }
    if !(interval > 0.0) || !(max > min) {
        return vec![];
    }

    let count = ((max as f64 - min as f64) / interval as f64).ceil() as u64;
    (0..=count)
        .map(|i| (min as f64 + i as f64 * interval as f64) as f32)
        .take_while(|&level| level < max)
        .filter(|&level| keep(level))
        .collect()
}

/// Marching squares over one level.
///
/// Cell corners at or above `level` count as inside. Cells with a NaN
/// corner are skipped.
pub fn march_squares(field: &ScalarField<'_>, level: f32) -> Vec<Segment> {
    let (width, height) = (field.width(), field.height());
    if width < 2 || height < 2 {
        return vec![];
    }

    let mut segments = Vec::new();

    for y in 0..(height - 1) {
        for x in 0..(width - 1) {
            let tl = field.get(x, y);
            let tr = field.get(x + 1, y);
            let bl = field.get(x, y + 1);
            let br = field.get(x + 1, y + 1);

            if tl.is_nan() || tr.is_nan() || bl.is_nan() || br.is_nan() {
                continue;
            }

            let mut cell_index = 0u8;
            if tl >= level { cell_index |= 1; }
            if tr >= level { cell_index |= 2; }
            if br >= level { cell_index |= 4; }
            if bl >= level { cell_index |= 8; }

            if cell_index == 0 || cell_index == 15 {
                continue;
            }

            let corners = [tl, tr, br, bl];
            push_cell_segments(&mut segments, cell_index, x as f32, y as f32, corners, level);
        }
    }

    segments
}

fn push_cell_segments(
    out: &mut Vec<Segment>,
    cell_index: u8,
    x: f32,
    y: f32,
    [tl, tr, br, bl]: [f32; 4],
    level: f32,
) {
    // Each edge is interpolated from its own two corners in a fixed order,
    // so neighbouring cells produce bit-identical shared points.
    let top = || interpolate_edge(x, y, x + 1.0, y, tl, tr, level);
    let right = || interpolate_edge(x + 1.0, y, x + 1.0, y + 1.0, tr, br, level);
    let bottom = || interpolate_edge(x, y + 1.0, x + 1.0, y + 1.0, bl, br, level);
    let left = || interpolate_edge(x, y, x, y + 1.0, tl, bl, level);
    let mut seg = |start: Point, end: Point| out.push(Segment { start, end });

    let centre_inside = (tl + tr + br + bl) / 4.0 >= level;

    match cell_index {
        1 | 14 => seg(left(), top()),
        2 | 13 => seg(top(), right()),
        3 | 12 => seg(left(), right()),
        4 | 11 => seg(right(), bottom()),
        6 | 9 => seg(top(), bottom()),
        7 | 8 => seg(left(), bottom()),
        // Saddles: tl+br inside (5) or tr+bl inside (10)
        5 if centre_inside => {
            seg(top(), right());
            seg(left(), bottom());
        }
        5 => {
            seg(left(), top());
            seg(right(), bottom());
        }
        10 if centre_inside => {
            seg(left(), top());
            seg(right(), bottom());
        }
        10 => {
            seg(top(), right());
            seg(left(), bottom());
        }
        _ => {}
    }
}

/// Linearly interpolate between two edge points based on data values
fn interpolate_edge(x1: f32, y1: f32, x2: f32, y2: f32, val1: f32, val2: f32, level: f32) -> Point {
    if (val2 - val1).abs() < 1e-6 {
        return Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    }

    let t = ((level - val1) / (val2 - val1)).clamp(0.0, 1.0);

    Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}

/// Chain segments into maximal polylines.
///
/// Segments are joined where endpoints are bit-identical. Chains are
/// grown in both directions from their first segment, so an open line is
/// never split in two. Output order follows the input order of each
/// chain's first segment.
pub fn connect_segments(segments: Vec<Segment>) -> Vec<Vec<Point>> {
    if segments.is_empty() {
        return vec![];
    }

    let mut at: HashMap<(u32, u32), Vec<usize>> = HashMap::with_capacity(segments.len() * 2);
    for (i, seg) in segments.iter().enumerate() {
        at.entry(seg.start.key()).or_default().push(i);
        at.entry(seg.end.key()).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut lines = Vec::new();

    for first in 0..segments.len() {
        if used[first] {
            continue;
        }
        used[first] = true;

        let mut forward = vec![segments[first].start, segments[first].end];
        extend_chain(&mut forward, &segments, &at, &mut used);

        if forward.first() != forward.last() {
            let mut backward = vec![segments[first].start];
            extend_chain(&mut backward, &segments, &at, &mut used);
            if backward.len() > 1 {
                backward.reverse();
                backward.pop();
                backward.extend(forward);
                forward = backward;
            }
        }

        lines.push(forward);
    }

    lines
}

fn extend_chain(
    points: &mut Vec<Point>,
    segments: &[Segment],
    at: &HashMap<(u32, u32), Vec<usize>>,
    used: &mut [bool],
) {
    while let Some(&tail) = points.last() {
        let key = tail.key();
        let next = at
            .get(&key)
            .and_then(|candidates| candidates.iter().copied().find(|&i| !used[i]));

        let Some(i) = next else { break };
        used[i] = true;
        let seg = segments[i];
        points.push(if seg.start.key() == key { seg.end } else { seg.start });
    }
}
