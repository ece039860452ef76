//! PNG output for extracted sprites.

use std::fs;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{Result, SliceError};
use crate::types::ExtractedSprite;

/// Encoded preview of one sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpritePreview {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Standalone PNG stream.
    pub png: Vec<u8>,
}

/// Encode an RGBA buffer as a standalone PNG byte stream.
pub fn encode_png(pixels: &RgbaImage) -> std::result::Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        pixels.as_raw(),
        pixels.width(),
        pixels.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

/// Encode a sprite, tagging failures with its index.
pub fn encode_sprite(sprite: &ExtractedSprite) -> Result<Vec<u8>> {
    encode_png(&sprite.pixels).map_err(|e| SliceError::Encoding {
        index: sprite.index,
        message: e.to_string(),
    })
}

/// Encode every sprite for display, in order.
pub fn previews(sprites: &[ExtractedSprite]) -> Result<Vec<SpritePreview>> {
    sprites
        .iter()
        .map(|sprite| {
            Ok(SpritePreview {
                name: sprite.name.clone(),
                width: sprite.width,
                height: sprite.height,
                png: encode_sprite(sprite)?,
            })
        })
        .collect()
}

/// Write a sprite to a PNG file.
pub fn write_png(sprite: &ExtractedSprite, path: &Path) -> Result<()> {
    let bytes = encode_sprite(sprite)?;
    fs::write(path, bytes).map_err(|e| SliceError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}
