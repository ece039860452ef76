//! Decoded sheet images and the sprites cut from them.

use image::RgbaImage;

use crate::error::{Result, SliceError};

/// A fully decoded sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Decode raw image bytes in any format the `image` crate recognises.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| SliceError::ImageDecode {
            message: e.to_string(),
        })?;

        let pixels = decoded.to_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(SliceError::ImageDecode {
                message: format!(
                    "image has zero dimensions ({}x{})",
                    pixels.width(),
                    pixels.height()
                ),
            });
        }

        Ok(Self { pixels })
    }

    /// Wrap an already decoded RGBA buffer.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// One sprite cut out of a sheet. Owns its pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSprite {
    /// Position in the extraction output.
    pub index: usize,
    /// `<base>_<index>`, for display.
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
}

/// Derive the base name used for sprite and archive naming.
///
/// Takes the last path segment and drops everything from its final `.`
/// onwards. A name without a `.` is returned whole; `".png"` yields `""`.
pub fn base_file_name(file_name: &str) -> String {
    let segment = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name);

    match segment.rfind('.') {
        Some(dot) => segment[..dot].to_string(),
        None => segment.to_string(),
    }
}
