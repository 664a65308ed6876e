//! Synthetic elevation data generators.
//!
//! Fields are returned row-major (row 0 first). Tile payloads use the
//! text DEM format: 256 comma-separated cells per row, newline-separated
//! rows, `e` for "no data".

/// Tile edge length used by the payload generators.
pub const TILE_SIZE: usize = 256;

/// Builds a tile payload from a per-cell function of (x, y).
///
/// `None` cells are written as the `e` no-data sentinel.
pub fn tile_payload<F>(cell: F) -> String
where
    F: Fn(usize, usize) -> Option<f64>,
{
    let mut out = String::with_capacity(TILE_SIZE * TILE_SIZE * 6);
    for y in 0..TILE_SIZE {
        let row: Vec<String> = (0..TILE_SIZE)
            .map(|x| match cell(x, y) {
                Some(v) => format!("{}", v),
                None => "e".to_string(),
            })
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// A tile where every cell has the same elevation.
pub fn constant_tile_payload(value: f64) -> String {
    tile_payload(|_, _| Some(value))
}

/// A tile made entirely of no-data cells (open sea).
pub fn no_data_tile_payload() -> String {
    tile_payload(|_, _| None)
}

/// A tile whose elevation rises by `step` metres per column.
pub fn ramp_tile_payload(base: f64, step: f64) -> String {
    tile_payload(|x, _| Some(base + step * x as f64))
}

/// A field with a vertical cliff: columns `<= column` hold `low`, the rest `high`.
pub fn step_field(width: usize, height: usize, column: usize, low: f32, high: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for _ in 0..height {
        for x in 0..width {
            data.push(if x <= column { low } else { high });
        }
    }
    data
}

/// A cone-shaped peak centred on (cx, cy).
///
/// Elevation falls linearly from `peak` by `slope` metres per cell and
/// never drops below zero.
pub fn cone_field(width: usize, height: usize, cx: f32, cy: f32, peak: f32, slope: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            data.push((peak - slope * d).max(0.0));
        }
    }
    data
}

/// A cone tile payload in world-pixel space.
///
/// `origin` is the world pixel of the tile's top-left cell, so adjacent
/// tiles built with the same peak line up into one continuous mountain.
pub fn cone_tile_payload(origin: (i64, i64), peak_at: (i64, i64), peak: f64, slope: f64) -> String {
    tile_payload(|x, y| {
        let dx = (origin.0 + x as i64 - peak_at.0) as f64;
        let dy = (origin.1 + y as i64 - peak_at.1) as f64;
        let elev = peak - slope * (dx * dx + dy * dy).sqrt();
        if elev <= 0.0 {
            None
        } else {
            Some(elev.round())
        }
    })
}
