//! Drawing surfaces.
//!
//! [`Surface`] is the small 2-D API the renderers draw through: a sized
//! canvas with path stroking and scaled image blits. [`PixmapSurface`]
//! implements it on a `tiny-skia` pixmap.

use contour_common::{ContourError, ContourResult, Rgba, StrokeStyle};
use tiny_skia::{
    ColorU8, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::contour::Point;
use crate::png;

/// A straight-alpha RGBA image, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaImage {
    /// A fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.index(x, y);
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&color.to_array());
    }

    /// Number of pixels with non-zero alpha.
    pub fn opaque_pixel_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Destination rectangle of a blit, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Maps drawing coordinates onto the surface: `(p + offset) * scale`.
///
/// Omitted scales are 1.0 on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Placement {
    pub fn scaled(scale_x: f32, scale_y: f32) -> Self {
        Self {
            scale_x,
            scale_y,
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset_x: f32, offset_y: f32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn apply(&self, p: Point) -> (f32, f32) {
        (
            (p.x + self.offset_x) * self.scale_x,
            (p.y + self.offset_y) * self.scale_y,
        )
    }

    /// Where a `width`×`height` image drawn at this placement lands.
    pub fn dest_rect(&self, width: u32, height: u32) -> DestRect {
        DestRect {
            x: self.offset_x * self.scale_x,
            y: self.offset_y * self.scale_y,
            width: width as f32 * self.scale_x,
            height: height as f32 * self.scale_y,
        }
    }
}

/// A 2-D drawing target.
///
/// Path state follows the usual canvas model: `begin_path` clears it,
/// `move_to` starts a sub-path and `stroke` draws every sub-path with the
/// current style.
pub trait Surface: Send {
    /// Resize the surface. Existing content is discarded.
    fn set_size(&mut self, width: u32, height: u32) -> ContourResult<()>;

    fn size(&self) -> (u32, u32);

    fn set_stroke_style(&mut self, style: &StrokeStyle);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f32, y: f32);

    fn line_to(&mut self, x: f32, y: f32);

    fn stroke(&mut self) -> ContourResult<()>;

    /// Composite `image` over the surface, scaled into `dest`.
    fn draw_image(&mut self, image: &RgbaImage, dest: DestRect) -> ContourResult<()>;
}

/// [`Surface`] backed by a `tiny-skia` pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    stroke: StrokeStyle,
    subpaths: Vec<Vec<(f32, f32)>>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> ContourResult<Self> {
        Ok(Self {
            pixmap: new_pixmap(width, height)?,
            stroke: StrokeStyle::new(Rgba::BLACK, 1.0),
            subpaths: Vec::new(),
        })
    }

    /// Surface content as straight-alpha RGBA.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (px, out) in self.pixmap.pixels().iter().zip(image.data.chunks_exact_mut(4)) {
            let c = px.demultiply();
            out.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }

    /// Encode the surface as PNG.
    pub fn encode_png(&self) -> ContourResult<Vec<u8>> {
        let image = self.to_rgba();
        png::encode_png_auto(image.data(), image.width() as usize, image.height() as usize)
    }
}

fn new_pixmap(width: u32, height: u32) -> ContourResult<Pixmap> {
    Pixmap::new(width, height).ok_or_else(|| {
        ContourError::surface(format!("cannot allocate a {}x{} surface", width, height))
    })
}

impl Surface for PixmapSurface {
    fn set_size(&mut self, width: u32, height: u32) -> ContourResult<()> {
        self.pixmap = new_pixmap(width, height)?;
        self.subpaths.clear();
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) {
        self.stroke = *style;
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.subpaths.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        match self.subpaths.last_mut() {
            Some(sub) => sub.push((x, y)),
            None => self.subpaths.push(vec![(x, y)]),
        }
    }

    fn stroke(&mut self) -> ContourResult<()> {
        let mut pb = PathBuilder::new();
        for sub in self.subpaths.iter().filter(|s| s.len() >= 2) {
            pb.move_to(sub[0].0, sub[0].1);
            for &(x, y) in &sub[1..] {
                pb.line_to(x, y);
            }
        }

        // Nothing drawable
        let Some(path) = pb.finish() else {
            return Ok(());
        };

        let c = self.stroke.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: self.stroke.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: DestRect) -> ContourResult<()> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }

        let mut src = new_pixmap(image.width(), image.height())?;
        for (px, rgba) in src.pixels_mut().iter_mut().zip(image.data().chunks_exact(4)) {
            *px = ColorU8::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]).premultiply();
        }

        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        let sx = dest.width / image.width() as f32;
        let sy = dest.height / image.height() as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, dest.x, dest.y);

        self.pixmap.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_defaults_each_scale_to_one() {
        let p = Placement::default().with_offset(10.0, 20.0);
        assert_eq!(p.apply(Point::new(1.0, 2.0)), (11.0, 22.0));
        assert_eq!(
            p.dest_rect(256, 256),
            DestRect { x: 10.0, y: 20.0, width: 256.0, height: 256.0 }
        );
    }

    #[test]
    fn test_placement_scaled() {
        let p = Placement::scaled(2.0, 0.5).with_offset(-4.0, 8.0);
        assert_eq!(p.apply(Point::new(6.0, 0.0)), (4.0, 4.0));
        assert_eq!(p.dest_rect(10, 10).width, 20.0);
    }

    #[test]
    fn test_rgba_image_pixels() {
        let mut img = RgbaImage::new(3, 2);
        img.set_pixel(2, 1, Rgba::new(1, 2, 3, 4));
        assert_eq!(img.pixel(2, 1), Rgba::new(1, 2, 3, 4));
        assert_eq!(img.opaque_pixel_count(), 1);
    }

    #[test]
    fn test_zero_size_surface_is_error() {
        assert!(PixmapSurface::new(0, 10).is_err());
    }

    #[test]
    fn test_stroke_without_path_is_noop() {
        let mut s = PixmapSurface::new(4, 4).unwrap();
        s.begin_path();
        s.move_to(1.0, 1.0);
        s.stroke().unwrap();
        assert_eq!(s.to_rgba().opaque_pixel_count(), 0);
    }
}
