//! In-memory tile source.

use std::collections::HashMap;

use async_trait::async_trait;
use contour_common::TileCoord;

use super::TileSource;
use crate::error::{Result, TileSourceError};

/// Serves payloads from a map. Coordinates can also be marked as failing
/// to exercise the transport-error path.
#[derive(Debug, Clone, Default)]
pub struct MemoryTileSource {
    tiles: HashMap<TileCoord, String>,
    failing: HashMap<TileCoord, u16>,
}

impl MemoryTileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coord: TileCoord, payload: impl Into<String>) {
        self.tiles.insert(coord, payload.into());
    }

    pub fn with_tile(mut self, coord: TileCoord, payload: impl Into<String>) -> Self {
        self.insert(coord, payload);
        self
    }

    /// Make `coord` answer with an HTTP-style error status.
    pub fn with_failure(mut self, coord: TileCoord, status: u16) -> Self {
        self.failing.insert(coord, status);
        self
    }
}

#[async_trait]
impl TileSource for MemoryTileSource {
    async fn fetch_tile(&self, coord: TileCoord) -> Result<Option<String>> {
        if let Some(&status) = self.failing.get(&coord) {
            return Err(TileSourceError::HttpStatus {
                status,
                url: format!("memory://{}", coord.key()),
            });
        }
        Ok(self.tiles.get(&coord).cloned())
    }
}
