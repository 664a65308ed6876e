//! Geographic bounding box types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A geographic bounding box in degrees.
///
/// Corners are stored in the order the caller supplied them; nothing
/// guarantees `min_lat <= max_lat` until [`GeoBoundingBox::normalized`]
/// is applied. Extent resolution never relies on the order either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl GeoBoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Parse a "minLat,minLon,maxLat,maxLon" string.
    pub fn from_csv(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |v: &str| {
            v.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(v.to_string()))
        };

        Ok(Self {
            min_lat: parse(parts[0])?,
            min_lon: parse(parts[1])?,
            max_lat: parse(parts[2])?,
            max_lon: parse(parts[3])?,
        })
    }

    /// Return a copy with each axis sorted so min <= max.
    pub fn normalized(&self) -> Self {
        Self {
            min_lat: self.min_lat.min(self.max_lat),
            min_lon: self.min_lon.min(self.max_lon),
            max_lat: self.min_lat.max(self.max_lat),
            max_lon: self.min_lon.max(self.max_lon),
        }
    }

    /// Check that every coordinate is finite and inside the Mercator range.
    pub fn is_projectable(&self) -> bool {
        let lat_ok = |lat: f64| lat.is_finite() && lat.abs() < MERCATOR_MAX_LAT;
        let lon_ok = |lon: f64| lon.is_finite() && (-180.0..=180.0).contains(&lon);
        lat_ok(self.min_lat) && lat_ok(self.max_lat) && lon_ok(self.min_lon) && lon_ok(self.max_lon)
    }
}

/// Latitude limit of the square Web Mercator world.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_78;

impl FromStr for GeoBoundingBox {
    type Err = BboxParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_csv(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bounding box format: {0}. Expected 'minLat,minLon,maxLat,maxLon'")]
    InvalidFormat(String),

    #[error("Invalid number in bounding box: {0}")]
    InvalidNumber(String),
}
