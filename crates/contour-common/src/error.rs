//! Error types for contour map rendering.

use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Primary error type for contour map operations.
///
/// Tile retrieval problems are deliberately absent: a missing or broken
/// tile degrades to "no data" and never aborts a draw.
#[derive(Debug, Error)]
pub enum ContourError {
    // === Configuration Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    #[error("Bounding box covers no pixels at zoom {zoom} ({width}x{height})")]
    EmptyExtent { zoom: u32, width: i64, height: i64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // === Rendering Errors ===
    #[error("Drawing surface error: {0}")]
    SurfaceError(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),
}

impl ContourError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a SurfaceError.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::SurfaceError(msg.into())
    }

    /// Create a RenderError.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::RenderError(msg.into())
    }
}
