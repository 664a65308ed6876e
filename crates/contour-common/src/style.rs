//! Contour styling.
//!
//! A style is looked up per contour elevation and may be absent, which
//! means "do not draw this level". Vector and raster rendering need
//! differently shaped styles, so each has its own capability trait:
//! [`StrokeStyler`] yields a stroke (colour and width) and
//! [`RasterStyler`] yields a single RGBA pixel value.

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour (straight, not premultiplied alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Stroke parameters for vector contour lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }
}

/// Per-level stroke lookup for vector rendering.
pub trait StrokeStyler: Send + Sync {
    /// Stroke for contours at `elevation`, or `None` to skip the level.
    fn style_for(&self, elevation: f32) -> Option<StrokeStyle>;
}

/// Per-level pixel colour lookup for raster (fast) rendering.
pub trait RasterStyler: Send + Sync {
    /// Pixel colour for band edges at `elevation`, or `None` to skip.
    fn style_for(&self, elevation: f32) -> Option<Rgba>;
}

impl<F> StrokeStyler for F
where
    F: Fn(f32) -> Option<StrokeStyle> + Send + Sync,
{
    fn style_for(&self, elevation: f32) -> Option<StrokeStyle> {
        self(elevation)
    }
}

impl<F> RasterStyler for F
where
    F: Fn(f32) -> Option<Rgba> + Send + Sync,
{
    fn style_for(&self, elevation: f32) -> Option<Rgba> {
        self(elevation)
    }
}

/// Elevation step at which the default styles draw a darker line.
pub const DEFAULT_MAJOR_INTERVAL: f32 = 500.0;

fn is_multiple_of(elevation: f32, interval: f32) -> bool {
    if interval <= 0.0 {
        return false;
    }
    let rem = elevation.rem_euclid(interval);
    rem < 1e-3 || interval - rem < 1e-3
}

/// Default vector style: every 500 m black, otherwise grey, 1px wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrokeStyle;

impl StrokeStyler for DefaultStrokeStyle {
    fn style_for(&self, elevation: f32) -> Option<StrokeStyle> {
        let color = if is_multiple_of(elevation, DEFAULT_MAJOR_INTERVAL) {
            Rgba::new(0x00, 0x00, 0x00, 0xff)
        } else {
            Rgba::new(0x70, 0x70, 0x70, 0xff)
        };
        Some(StrokeStyle::new(color, 1.0))
    }
}

/// Default raster style: every 500 m opaque black, otherwise translucent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRasterStyle;

impl RasterStyler for DefaultRasterStyle {
    fn style_for(&self, elevation: f32) -> Option<Rgba> {
        if is_multiple_of(elevation, DEFAULT_MAJOR_INTERVAL) {
            Some(Rgba::new(0x00, 0x00, 0x00, 0xff))
        } else {
            Some(Rgba::new(0x00, 0x00, 0x00, 0x70))
        }
    }
}

/// Color representation supporting multiple formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Hex string "#RRGGBB" / "#RRGGBBAA", or a named colour
    Hex(String),

    /// RGB array: [r, g, b] or [r, g, b, a]
    Array(Vec<u8>),

    /// Explicit RGBA
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl Color {
    /// Resolve to an RGBA value.
    pub fn to_rgba(&self) -> Rgba {
        match self {
            Color::Hex(s) if s.starts_with('#') => parse_hex_color(s),
            Color::Hex(name) => named_color(name),
            Color::Array(arr) => {
                let r = arr.first().copied().unwrap_or(0);
                let g = arr.get(1).copied().unwrap_or(0);
                let b = arr.get(2).copied().unwrap_or(0);
                let a = arr.get(3).copied().unwrap_or(255);
                Rgba::new(r, g, b, a)
            }
            Color::Rgba { r, g, b, a } => Rgba::new(*r, *g, *b, *a),
        }
    }
}

fn parse_hex_color(s: &str) -> Rgba {
    let s = s.trim_start_matches('#');
    let channel = |i: usize, default: u8| {
        s.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(default)
    };

    match s.len() {
        6 => Rgba::new(channel(0, 0), channel(2, 0), channel(4, 0), 255),
        8 => Rgba::new(channel(0, 0), channel(2, 0), channel(4, 0), channel(6, 255)),
        _ => Rgba::BLACK,
    }
}

fn named_color(name: &str) -> Rgba {
    match name.to_lowercase().as_str() {
        "transparent" => Rgba::new(0, 0, 0, 0),
        "black" => Rgba::new(0, 0, 0, 255),
        "white" => Rgba::new(255, 255, 255, 255),
        "red" => Rgba::new(255, 0, 0, 255),
        "green" => Rgba::new(0, 255, 0, 255),
        "blue" => Rgba::new(0, 0, 255, 255),
        "brown" => Rgba::new(139, 69, 19, 255),
        "orange" => Rgba::new(255, 165, 0, 255),
        "gray" | "grey" => Rgba::new(128, 128, 128, 255),
        _ => Rgba::BLACK,
    }
}

/// Configurable contour style, loadable from YAML/JSON.
///
/// Levels on a multiple of `major_interval` use the major colour/width.
/// With `major_only` set, all other levels are skipped, which gives sparse
/// contour intervals such as "only every 500 m".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourStyle {
    pub line_color: Color,
    pub line_width: f32,
    pub major_interval: Option<f32>,
    pub major_color: Option<Color>,
    pub major_width: Option<f32>,
    pub major_only: bool,
}

impl Default for ContourStyle {
    fn default() -> Self {
        Self {
            line_color: Color::Hex("#707070".to_string()),
            line_width: 1.0,
            major_interval: Some(DEFAULT_MAJOR_INTERVAL),
            major_color: Some(Color::Hex("#000000".to_string())),
            major_width: None,
            major_only: false,
        }
    }
}

impl ContourStyle {
    /// A single colour for every level.
    pub fn solid(color: Rgba, width: f32) -> Self {
        let color = Color::Rgba {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        Self {
            line_color: color,
            line_width: width,
            major_interval: None,
            major_color: None,
            major_width: None,
            major_only: false,
        }
    }

    fn is_major(&self, elevation: f32) -> bool {
        self.major_interval
            .map(|interval| is_multiple_of(elevation, interval))
            .unwrap_or(false)
    }
}

impl StrokeStyler for ContourStyle {
    fn style_for(&self, elevation: f32) -> Option<StrokeStyle> {
        if self.is_major(elevation) {
            let color = self.major_color.as_ref().unwrap_or(&self.line_color);
            let width = self.major_width.unwrap_or(self.line_width);
            Some(StrokeStyle::new(color.to_rgba(), width))
        } else if self.major_only {
            None
        } else {
            Some(StrokeStyle::new(self.line_color.to_rgba(), self.line_width))
        }
    }
}

impl RasterStyler for ContourStyle {
    fn style_for(&self, elevation: f32) -> Option<Rgba> {
        StrokeStyler::style_for(self, elevation).map(|stroke| stroke.color)
    }
}
