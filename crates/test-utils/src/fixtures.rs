//! Common test fixtures for contour map tests.

/// Bounding boxes as (minLat, minLon, maxLat, maxLon).
pub mod bbox {
    /// Hachimantai, Tohoku: a 0.1° square covering 2x2 tiles at zoom 12
    pub const HACHIMANTAI: (f64, f64, f64, f64) = (39.80, 140.95, 39.90, 141.05);

    /// A small box inside tile 12/3651/1552
    pub const SINGLE_TILE: (f64, f64, f64, f64) = (39.86, 140.96, 39.88, 140.97);
}

/// Contour parameters used by the end-to-end scenario.
pub mod levels {
    pub const MIN_ELEVATION: f32 = 0.0;
    pub const MAX_ELEVATION: f32 = 4000.0;
    pub const INTERVAL: f32 = 50.0;
    pub const ZOOM: u32 = 12;
    pub const OUTPUT_SIZE: u32 = 400;
}
