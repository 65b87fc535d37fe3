use std::path::Path;

use image::ImageReader;
use thiserror::Error;

/// Narrowest image accepted as a wallpaper, in pixels.
pub const MIN_WALLPAPER_WIDTH: u32 = 1920;

#[derive(Debug, Error)]
#[error("could not read image dimensions of {path}: {message}")]
pub struct ProbeError {
    pub path: String,
    pub message: String,
}

/// Reads `(width, height)` from the image header without decoding pixels.
/// The format is sniffed from content, not from the file extension.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32), ProbeError> {
    let to_err = |message: String| ProbeError {
        path: path.display().to_string(),
        message,
    };
    ImageReader::open(path)
        .map_err(|e| to_err(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| to_err(e.to_string()))?
        .into_dimensions()
        .map_err(|e| to_err(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePolicy {
    pub min_width: u32,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            min_width: MIN_WALLPAPER_WIDTH,
        }
    }
}

impl SizePolicy {
    pub fn accepts(&self, width: u32) -> bool {
        width >= self.min_width
    }
}
