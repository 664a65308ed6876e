//! Error types for elevation tile retrieval.

use thiserror::Error;

/// Errors a tile source can report.
///
/// "Tile not found" is not an error: sources return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum TileSourceError {
    /// The server answered with an unexpected status.
    #[error("unexpected HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// The request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Reading a local tile failed for a reason other than absence.
    #[error("I/O error: {0}")]
    Io(String),

    /// The URL template cannot address tiles.
    #[error("invalid tile URL template '{0}': must contain {{z}}, {{x}} and {{y}}")]
    InvalidTemplate(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl TileSourceError {
    /// Create a ConfigError.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<std::io::Error> for TileSourceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for TileSourceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type for tile source operations.
pub type Result<T> = std::result::Result<T, TileSourceError>;
