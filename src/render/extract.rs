//! Region extraction.
//!
//! Cuts each frame of a sheet into its own RGBA buffer. Frames that run past
//! the decoded image are clipped to the image and padded with transparent
//! pixels, so the sprite always has the declared size and one bad frame
//! never fails the batch.

use image::{imageops, RgbaImage};

use crate::types::{ExtractedSprite, FrameRegion, SheetMetadata, SourceImage};

/// A frame that does not fit inside the decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClippedRegion {
    pub index: usize,
    pub key: String,
    /// Declared frame size.
    pub declared: (u32, u32),
    /// Part of the frame actually covered by source pixels.
    pub copied: (u32, u32),
}

/// Extract every frame of `metadata` from `image`, in metadata order.
///
/// Sprites are named `<base_name>_<index>`. The returned buffers are fresh
/// allocations; neither input is modified.
pub fn extract(
    image: &SourceImage,
    metadata: &SheetMetadata,
    base_name: &str,
) -> Vec<ExtractedSprite> {
    metadata
        .frames()
        .iter()
        .enumerate()
        .map(|(index, frame)| ExtractedSprite {
            index,
            name: format!("{}_{}", base_name, index),
            width: frame.w,
            height: frame.h,
            pixels: copy_region(image.pixels(), frame),
        })
        .collect()
}

/// List the frames that extraction will clip.
pub fn clipped_regions(image: &SourceImage, metadata: &SheetMetadata) -> Vec<ClippedRegion> {
    metadata
        .frames()
        .iter()
        .filter(|f| !f.fits_within(image.width(), image.height()))
        .map(|f| ClippedRegion {
            index: f.index,
            key: f.key.clone(),
            declared: (f.w, f.h),
            copied: covered_extent(image.pixels(), f),
        })
        .collect()
}

/// Copy one frame into a new `w × h` buffer, transparent where the source
/// has no pixels.
fn copy_region(source: &RgbaImage, frame: &FrameRegion) -> RgbaImage {
    let mut sprite = RgbaImage::new(frame.w, frame.h);

    let (cw, ch) = covered_extent(source, frame);
    if cw > 0 && ch > 0 {
        let block = imageops::crop_imm(source, frame.x, frame.y, cw, ch).to_image();
        imageops::replace(&mut sprite, &block, 0, 0);
    }

    sprite
}

/// Width and height of the part of `frame` that overlaps `source`.
/// `(0, 0)` when there is no overlap at all.
fn covered_extent(source: &RgbaImage, frame: &FrameRegion) -> (u32, u32) {
    let cw = source.width().saturating_sub(frame.x).min(frame.w);
    let ch = source.height().saturating_sub(frame.y).min(frame.h);
    if cw == 0 || ch == 0 {
        (0, 0)
    } else {
        (cw, ch)
    }
}
