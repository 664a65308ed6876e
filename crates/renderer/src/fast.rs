//! Fast contour bands by per-pixel neighbour comparison.
//!
//! Each sample is quantized to `floor(elevation / interval)`. A sample is
//! a contour pixel when its band differs from the sample to its right,
//! below or diagonally below-right. The last row and column have no such
//! neighbours and are never flagged.

use contour_common::{ContourError, ContourResult, RasterStyler};

use crate::canvas::RgbaImage;
use crate::contour::ScalarField;

fn band(elevation: f32, interval: f32) -> i64 {
    (elevation / interval).floor() as i64
}

/// Band index of every sample, row-major.
pub fn band_indices(field: &ScalarField<'_>, interval: f32) -> ContourResult<Vec<i64>> {
    if !(interval > 0.0) {
        return Err(ContourError::invalid_parameter(
            "interval",
            format!("must be > 0, got {}", interval),
        ));
    }
    Ok(field.data().iter().map(|&v| band(v, interval)).collect())
}

/// Row-major flags marking band-boundary samples.
pub fn band_edge_mask(field: &ScalarField<'_>, interval: f32) -> ContourResult<Vec<bool>> {
    let bands = band_indices(field, interval)?;
    let (w, h) = (field.width(), field.height());
    let mut mask = vec![false; w * h];

    for y in 0..h.saturating_sub(1) {
        for x in 0..w.saturating_sub(1) {
            let i = y * w + x;
            let b = bands[i];
            mask[i] = b != bands[i + 1] || b != bands[i + w] || b != bands[i + w + 1];
        }
    }

    Ok(mask)
}

/// Paint band-boundary samples with the style of their band.
///
/// A flagged sample is coloured by `styler` at `band * interval`; when the
/// styler yields nothing the pixel stays transparent.
pub fn band_edges(
    field: &ScalarField<'_>,
    interval: f32,
    styler: &dyn RasterStyler,
) -> ContourResult<RgbaImage> {
    let mask = band_edge_mask(field, interval)?;
    let (w, h) = (field.width(), field.height());
    let mut image = RgbaImage::new(w as u32, h as u32);

    for (i, &flagged) in mask.iter().enumerate() {
        if !flagged {
            continue;
        }
        let elevation = band(field.data()[i], interval) as f32 * interval;
        if let Some(color) = styler.style_for(elevation) {
            image.set_pixel((i % w) as u32, (i / w) as u32, color);
        }
    }

    Ok(image)
}
