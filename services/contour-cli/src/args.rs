//! Command-line arguments and how they layer over a map definition file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contour_common::GeoBoundingBox;
use contour_map::{MapConfig, RenderMode};
use elevation::TileSourceConfig;

#[derive(Parser, Debug)]
#[command(name = "contour-map")]
#[command(about = "Render contour lines from elevation tiles to a PNG image")]
pub struct Args {
    /// Map definition file (YAML). Flags override its values.
    #[arg(short, long, env = "CONTOUR_MAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bounding box as "minLat,minLon,maxLat,maxLon"
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<GeoBoundingBox>,

    /// Tile zoom level
    #[arg(short, long)]
    pub zoom: Option<u32>,

    /// Lowest contour level in metres
    #[arg(long, allow_hyphen_values = true)]
    pub min_elev: Option<f32>,

    /// Upper bound for contour levels in metres (exclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub max_elev: Option<f32>,

    /// Spacing between contour levels in metres
    #[arg(short, long)]
    pub interval: Option<f32>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Rendering mode: bulk, tiled or fast
    #[arg(short, long)]
    pub mode: Option<RenderMode>,

    /// Tile URL template with {z}, {x} and {y}
    #[arg(long)]
    pub tile_url: Option<String>,

    /// Read tiles from a local {z}/{x}/{y}.txt tree instead of HTTP
    #[arg(long)]
    pub tile_dir: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "contours.png")]
    pub output: PathBuf,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// The map definition: the config file (or defaults) with flags applied.
    pub fn map_config(&self) -> Result<MapConfig> {
        let mut config = match &self.config {
            Some(path) => MapConfig::from_file(path)
                .with_context(|| format!("Failed to load map definition {}", path.display()))?,
            None => MapConfig::default(),
        };

        if let Some(bbox) = self.bbox {
            config.bbox = bbox;
        }
        if let Some(zoom) = self.zoom {
            config.zoom = zoom;
        }
        if let Some(min) = self.min_elev {
            config.min_elevation = min;
        }
        if let Some(max) = self.max_elev {
            config.max_elevation = max;
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        config.validate().context("Invalid map definition")?;
        Ok(config)
    }

    /// Tile source settings from the environment with flags applied.
    pub fn source_config(&self) -> TileSourceConfig {
        let mut config = TileSourceConfig::from_env();
        if let Some(url) = &self.tile_url {
            config.url_template = url.clone();
        }
        if let Some(dir) = &self.tile_dir {
            config.tile_dir = Some(dir.clone());
        }
        config
    }
}
