//! Drawing extracted contours and band images onto a [`Surface`].

use contour_common::{ContourResult, StrokeStyler};
use tracing::trace;

use crate::canvas::{Placement, RgbaImage, Surface};
use crate::contour::Contour;

/// Stroke each contour as its own path, styled by level.
///
/// Contours whose level has no style are skipped. Returns the number of
/// contours drawn.
pub fn stroke_contours<S>(
    surface: &mut S,
    contours: &[Contour],
    styler: &dyn StrokeStyler,
    placement: &Placement,
) -> ContourResult<usize>
where
    S: Surface + ?Sized,
{
    let mut drawn = 0;

    for contour in contours {
        let Some((first, rest)) = contour.points.split_first() else {
            continue;
        };
        let Some(style) = styler.style_for(contour.level) else {
            continue;
        };

        surface.set_stroke_style(&style);
        surface.begin_path();
        let (x, y) = placement.apply(*first);
        surface.move_to(x, y);
        for p in rest {
            let (x, y) = placement.apply(*p);
            surface.line_to(x, y);
        }
        surface.stroke()?;
        drawn += 1;
    }

    trace!(drawn, total = contours.len(), "Stroked contours");
    Ok(drawn)
}

/// Blit a band image at its placement.
pub fn blit_image<S>(surface: &mut S, image: &RgbaImage, placement: &Placement) -> ContourResult<()>
where
    S: Surface + ?Sized,
{
    surface.draw_image(image, placement.dest_rect(image.width(), image.height()))
}
