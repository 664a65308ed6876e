//! Contour map renderer.
//!
//! Fetches elevation tiles covering a bounding box, draws contour lines
//! and writes the result as a PNG:
//! - `bulk` stitches every tile and contours once
//! - `tiled` contours and draws each tile as it arrives
//! - `fast` paints raster band edges per tile

mod args;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use contour_map::ContourMap;
use elevation::source_from_config;
use renderer::PixmapSurface;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let config = args.map_config()?;
    let source_config = args.source_config();
    let source = source_from_config(&source_config).context("Failed to set up tile source")?;

    info!(
        bbox = ?config.bbox,
        zoom = config.zoom,
        mode = %config.mode,
        interval = config.interval,
        width = config.width,
        height = config.height,
        tile_dir = ?source_config.tile_dir,
        "Rendering contour map"
    );

    let map = ContourMap::from_config(&config, source)?;
    let mut surface = PixmapSurface::new(config.width, config.height)?;

    let start = Instant::now();
    let stats = map.draw(&mut surface).await.context("Rendering failed")?;
    let elapsed = start.elapsed();

    let png = surface.encode_png()?;
    tokio::fs::write(&args.output, &png)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        bytes = png.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        %stats,
        "Contour map written"
    );
    println!("{} ({} mode): {:.1?}", args.output.display(), config.mode, elapsed);

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}
