//! Map definitions loadable from YAML.
//!
//! ```yaml
//! bbox: { min_lat: 39.80, min_lon: 140.95, max_lat: 39.90, max_lon: 141.05 }
//! zoom: 12
//! min_elevation: 0
//! max_elevation: 4000
//! interval: 50
//! width: 400
//! height: 400
//! mode: tiled
//! style:
//!   line_color: "#0000ff"
//!   major_interval: 500
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use contour_common::{ContourError, ContourResult, ContourStyle, GeoBoundingBox};
use serde::{Deserialize, Serialize};

use crate::params::MapParams;

/// How a map is contoured and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Stitch every tile, contour once, stroke vectors.
    #[default]
    Bulk,
    /// Contour and stroke each tile as it arrives.
    Tiled,
    /// Per-tile raster band edges as tiles arrive.
    Fast,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bulk => "bulk",
            Self::Tiled => "tiled",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bulk" => Ok(Self::Bulk),
            "tiled" | "tile" => Ok(Self::Tiled),
            "fast" => Ok(Self::Fast),
            other => Err(ContourError::invalid_parameter(
                "mode",
                format!("expected bulk, tiled or fast, got '{}'", other),
            )),
        }
    }
}

/// A complete map definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub bbox: GeoBoundingBox,
    pub zoom: u32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub interval: f32,
    pub width: u32,
    pub height: u32,
    pub mode: RenderMode,
    pub style: ContourStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bbox: GeoBoundingBox::new(39.80, 140.95, 39.90, 141.05),
            zoom: 12,
            min_elevation: 0.0,
            max_elevation: 4000.0,
            interval: 50.0,
            width: 400,
            height: 400,
            mode: RenderMode::Bulk,
            style: ContourStyle::default(),
        }
    }
}

impl MapConfig {
    pub fn from_yaml_str(yaml: &str) -> ContourResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ContourError::ConfigError(format!("invalid map definition: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> ContourResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ContourError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn params(&self) -> MapParams {
        MapParams {
            bbox: self.bbox,
            zoom: self.zoom,
            min_elevation: self.min_elevation,
            max_elevation: self.max_elevation,
            interval: self.interval,
            width: self.width,
            height: self.height,
        }
    }

    pub fn validate(&self) -> ContourResult<()> {
        self.params().validate()?;

        let widths = [
            ("style.line_width", Some(self.style.line_width)),
            ("style.major_width", self.style.major_width),
        ];
        for (param, width) in widths {
            if let Some(width) = width {
                if !(width.is_finite() && width > 0.0) {
                    return Err(ContourError::invalid_parameter(
                        param,
                        format!("must be > 0, got {}", width),
                    ));
                }
            }
        }
        Ok(())
    }
}
