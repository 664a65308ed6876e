//! Contour extraction and rendering.
//!
//! - [`contour`]: the isoline kernel contract and marching squares
//! - [`fast`]: per-pixel band-edge detection for the raster fast path
//! - [`canvas`]: the drawing-surface contract and a `tiny-skia` surface
//! - [`render`]: drawing contours and band images onto a surface
//! - [`png`]: PNG encoding of finished maps

pub mod canvas;
pub mod contour;
pub mod fast;
pub mod png;
pub mod render;

pub use canvas::{DestRect, PixmapSurface, Placement, RgbaImage, Surface};
pub use contour::{
    contour_levels, identity_ticks, stretched_ticks, Contour, IsolineKernel, MarchingSquares, Point,
    ScalarField,
};
pub use fast::{band_edge_mask, band_edges};
pub use render::{blit_image, stroke_contours};
