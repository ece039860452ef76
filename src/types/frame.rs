//! Frame rectangles and parsed sheet metadata.

use std::fmt;

/// One named rectangular slice of a sprite sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRegion {
    /// Position in the source mapping, in the order the entries were written.
    pub index: usize,
    /// Mapping key from the metadata document. Display only.
    pub key: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl FrameRegion {
    /// Right edge (exclusive), widened so oversized frames can't overflow.
    pub fn right(&self) -> u64 {
        self.x as u64 + self.w as u64
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.h as u64
    }

    /// Whether the frame lies entirely inside a `width × height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }
}

impl fmt::Display for FrameRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.w, self.h, self.x, self.y)
    }
}

/// Declared dimensions of the whole sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub w: u32,
    pub h: u32,
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A validated metadata document.
///
/// Always holds at least one frame and a non-zero canvas size; the parser
/// is the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetMetadata {
    frames: Vec<FrameRegion>,
    canvas_size: CanvasSize,
}

impl SheetMetadata {
    pub(crate) fn new(frames: Vec<FrameRegion>, canvas_size: CanvasSize) -> Self {
        debug_assert!(!frames.is_empty());
        Self { frames, canvas_size }
    }

    /// Frames in document order.
    pub fn frames(&self) -> &[FrameRegion] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    /// Cross-check the declared canvas against a decoded image's dimensions.
    pub fn canvas_matches(&self, width: u32, height: u32) -> bool {
        self.canvas_size.w == width && self.canvas_size.h == height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(x: u32, y: u32, w: u32, h: u32) -> FrameRegion {
        FrameRegion {
            index: 0,
            key: "f".to_string(),
            x,
            y,
            w,
            h,
        }
    }

    #[test]
    fn test_fits_within() {
        assert!(frame(0, 0, 4, 4).fits_within(4, 4));
        assert!(frame(2, 2, 2, 2).fits_within(4, 4));
        assert!(!frame(3, 0, 2, 1).fits_within(4, 4));
        assert!(!frame(0, 3, 1, 2).fits_within(4, 4));
    }

    #[test]
    fn test_edges_do_not_overflow() {
        let f = frame(u32::MAX, u32::MAX, u32::MAX, 1);
        assert_eq!(f.right(), u32::MAX as u64 * 2);
        assert!(!f.fits_within(u32::MAX, u32::MAX));
    }

    #[test]
    fn test_canvas_matches() {
        let meta = SheetMetadata::new(vec![frame(0, 0, 1, 1)], CanvasSize { w: 32, h: 16 });
        assert!(meta.canvas_matches(32, 16));
        assert!(!meta.canvas_matches(16, 32));
    }

    #[test]
    fn test_display() {
        assert_eq!(frame(8, 0, 16, 24).to_string(), "16x24 at (8, 0)");
        assert_eq!(CanvasSize { w: 64, h: 32 }.to_string(), "64x32");
    }
}
