//! Local directory tile source.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use contour_common::TileCoord;

use super::TileSource;
use crate::error::Result;

/// Reads tiles laid out as `{root}/{z}/{x}/{y}.txt`, the same layout the
/// HTTP service uses.
#[derive(Debug, Clone)]
pub struct DirectoryTileSource {
    root: PathBuf,
}

impl DirectoryTileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn tile_path(&self, coord: TileCoord) -> PathBuf {
        self.root
            .join(coord.z.to_string())
            .join(coord.x.to_string())
            .join(format!("{}.txt", coord.y))
    }
}

#[async_trait]
impl TileSource for DirectoryTileSource {
    async fn fetch_tile(&self, coord: TileCoord) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.tile_path(coord)).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
