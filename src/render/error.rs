//! Rasterizer error types

use std::path::PathBuf;

/// Error type for text rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Font file could not be read
    #[error("Failed to read font '{}': {source}", .path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Font file is not a usable TrueType/OpenType font, or the size is unusable
    #[error("Failed to load font '{}': {reason}", .path.display())]
    FontLoad { path: PathBuf, reason: String },
    /// Column width of zero leaves no room for text
    #[error("Column width must be greater than zero")]
    ZeroColumns,
    /// Computed canvas has no area, does not fit in pixel coordinates, or is too large
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u64, height: u64 },
    /// PNG encoding failed
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    /// Temp file could not be created or moved
    #[error("Image I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// True for the font loading variants.
    pub fn is_font_error(&self) -> bool {
        matches!(self, RenderError::FontRead { .. } | RenderError::FontLoad { .. })
    }
}
