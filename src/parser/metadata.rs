//! Sprite sheet metadata parsing.
//!
//! Reads the TexturePacker-style JSON Hash layout:
//!
//! ```json
//! {
//!   "frames": { "idle": { "frame": { "x": 0, "y": 0, "w": 16, "h": 16 } } },
//!   "meta": { "size": { "w": 64, "h": 16 } }
//! }
//! ```
//!
//! Unknown fields (`rotated`, `trimmed`, `sourceSize`, `meta.app`, ...) are
//! ignored. Frame order follows the document, not key order.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Result, SliceError};
use crate::types::{CanvasSize, FrameRegion, SheetMetadata};

/// Largest frame area accepted, in pixels (16384 x 16384, 1 GiB of RGBA).
///
/// Every frame is extracted into its own buffer, so the area bounds the
/// allocation for a single sprite.
pub const MAX_FRAME_PIXELS: u64 = 16384 * 16384;

const LAYOUT_HELP: &str =
    "Expected {\"frames\": {\"<name>\": {\"frame\": {\"x\", \"y\", \"w\", \"h\"}}}, \"meta\": {\"size\": {\"w\", \"h\"}}}";

// --- JSON Hash deserialization types ---

#[derive(Deserialize)]
struct RawSheet {
    frames: IndexMap<String, RawFrame>,
    meta: RawMeta,
}

#[derive(Deserialize)]
struct RawFrame {
    frame: RawRect,
}

#[derive(Deserialize)]
struct RawRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

#[derive(Deserialize)]
struct RawMeta {
    size: RawSize,
}

#[derive(Deserialize)]
struct RawSize {
    w: u32,
    h: u32,
}

/// Parse a metadata document from text.
///
/// The whole document is rejected on the first structural problem; a
/// partially populated `SheetMetadata` is never returned.
pub fn parse_metadata(source: &str) -> Result<SheetMetadata> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let raw: RawSheet = serde_json::from_str(source).map_err(|e| SliceError::MalformedMetadata {
        message: e.to_string(),
        help: Some(LAYOUT_HELP.to_string()),
    })?;

    if raw.frames.is_empty() {
        return Err(SliceError::MalformedMetadata {
            message: "`frames` is empty".to_string(),
            help: Some("A sheet needs at least one frame".to_string()),
        });
    }

    let canvas_size = CanvasSize {
        w: raw.meta.size.w,
        h: raw.meta.size.h,
    };
    if canvas_size.w == 0 || canvas_size.h == 0 {
        return Err(SliceError::malformed(format!(
            "`meta.size` must be non-zero, got {}",
            canvas_size
        )));
    }

    let frames = raw
        .frames
        .into_iter()
        .enumerate()
        .map(|(index, (key, entry))| {
            let RawRect { x, y, w, h } = entry.frame;
            if w == 0 || h == 0 {
                return Err(SliceError::malformed(format!(
                    "frame '{}' has zero size ({}x{})",
                    key, w, h
                )));
            }
            if w as u64 * h as u64 > MAX_FRAME_PIXELS {
                return Err(SliceError::MalformedMetadata {
                    message: format!("frame '{}' is too large ({}x{})", key, w, h),
                    help: Some(format!(
                        "Frames may cover at most {} pixels",
                        MAX_FRAME_PIXELS
                    )),
                });
            }
            Ok(FrameRegion {
                index,
                key,
                x,
                y,
                w,
                h,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SheetMetadata::new(frames, canvas_size))
}

/// Parse a metadata document from raw upload bytes.
pub fn parse_metadata_bytes(bytes: &[u8]) -> Result<SheetMetadata> {
    let source = std::str::from_utf8(bytes).map_err(|e| SliceError::MalformedMetadata {
        message: format!("metadata is not valid UTF-8: {}", e),
        help: None,
    })?;
    parse_metadata(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHEET: &str = r#"{
        "frames": {
            "walk-2": { "frame": { "x": 16, "y": 0, "w": 16, "h": 16 } },
            "walk-1": { "frame": { "x": 0, "y": 0, "w": 16, "h": 16 } },
            "jump":   { "frame": { "x": 32, "y": 0, "w": 8, "h": 24 } }
        },
        "meta": { "size": { "w": 40, "h": 24 } }
    }"#;

    fn assert_malformed(source: &str) {
        match parse_metadata(source) {
            Err(SliceError::MalformedMetadata { .. }) => {}
            other => panic!("expected MalformedMetadata, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let meta = parse_metadata(SHEET).unwrap();

        let keys: Vec<&str> = meta.frames().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["walk-2", "walk-1", "jump"]);

        let indices: Vec<usize> = meta.frames().iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_rectangles_and_canvas() {
        let meta = parse_metadata(SHEET).unwrap();

        assert_eq!(
            meta.frames()[2],
            FrameRegion {
                index: 2,
                key: "jump".to_string(),
                x: 32,
                y: 0,
                w: 8,
                h: 24,
            }
        );
        assert_eq!(meta.canvas_size(), CanvasSize { w: 40, h: 24 });
        assert_eq!(meta.frame_count(), 3);
    }

    #[test]
    fn test_parse_ignores_texturepacker_extras() {
        let source = r#"{
            "frames": {
                "a": {
                    "frame": { "x": 0, "y": 0, "w": 4, "h": 4 },
                    "rotated": false,
                    "trimmed": false,
                    "spriteSourceSize": { "x": 0, "y": 0, "w": 4, "h": 4 },
                    "sourceSize": { "w": 4, "h": 4 }
                }
            },
            "meta": { "app": "px", "image": "sheet.png", "size": { "w": 4, "h": 4 }, "scale": "1" }
        }"#;

        let meta = parse_metadata(source).unwrap();
        assert_eq!(meta.frame_count(), 1);
    }

    #[test]
    fn test_parse_no_bounds_check() {
        // Frames may exceed the declared canvas; extraction deals with it.
        let source = r#"{
            "frames": { "big": { "frame": { "x": 10, "y": 10, "w": 100, "h": 100 } } },
            "meta": { "size": { "w": 8, "h": 8 } }
        }"#;
        assert!(parse_metadata(source).is_ok());
    }

    #[test]
    fn test_parse_strips_bom() {
        let source = format!("\u{feff}{}", SHEET);
        assert_eq!(parse_metadata(&source).unwrap().frame_count(), 3);
    }

    #[test]
    fn test_syntax_error() {
        assert_malformed("{ \"frames\": ");
        assert_malformed("not json");
        assert_malformed("");
    }

    #[test]
    fn test_missing_frames() {
        assert_malformed(r#"{ "meta": { "size": { "w": 4, "h": 4 } } }"#);
    }

    #[test]
    fn test_missing_meta_size() {
        assert_malformed(r#"{ "frames": { "a": { "frame": { "x": 0, "y": 0, "w": 1, "h": 1 } } } }"#);
        assert_malformed(
            r#"{ "frames": { "a": { "frame": { "x": 0, "y": 0, "w": 1, "h": 1 } } }, "meta": {} }"#,
        );
    }

    #[test]
    fn test_missing_frame_field_rejects_document() {
        assert_malformed(
            r#"{
                "frames": {
                    "ok": { "frame": { "x": 0, "y": 0, "w": 1, "h": 1 } },
                    "bad": { "frame": { "x": 0, "y": 0, "h": 1 } }
                },
                "meta": { "size": { "w": 4, "h": 4 } }
            }"#,
        );
    }

    #[test]
    fn test_negative_and_fractional_values() {
        assert_malformed(
            r#"{ "frames": { "a": { "frame": { "x": -1, "y": 0, "w": 1, "h": 1 } } }, "meta": { "size": { "w": 4, "h": 4 } } }"#,
        );
        assert_malformed(
            r#"{ "frames": { "a": { "frame": { "x": 0.5, "y": 0, "w": 1, "h": 1 } } }, "meta": { "size": { "w": 4, "h": 4 } } }"#,
        );
    }

    #[test]
    fn test_empty_frames() {
        assert_malformed(r#"{ "frames": {}, "meta": { "size": { "w": 4, "h": 4 } } }"#);
    }

    #[test]
    fn test_zero_sized_frame() {
        assert_malformed(
            r#"{ "frames": { "a": { "frame": { "x": 0, "y": 0, "w": 0, "h": 1 } } }, "meta": { "size": { "w": 4, "h": 4 } } }"#,
        );
    }

    #[test]
    fn test_oversized_frame_rejected() {
        assert_malformed(
            r#"{ "frames": { "big": { "frame": { "x": 0, "y": 0, "w": 4294967295, "h": 4294967295 } } }, "meta": { "size": { "w": 4, "h": 4 } } }"#,
        );
        assert_malformed(
            r#"{ "frames": { "big": { "frame": { "x": 0, "y": 0, "w": 100000, "h": 100000 } } }, "meta": { "size": { "w": 4, "h": 4 } } }"#,
        );
    }

    #[test]
    fn test_frame_at_area_limit_accepted() {
        let meta = parse_metadata(
            r#"{ "frames": { "strip": { "frame": { "x": 0, "y": 0, "w": 268435456, "h": 1 } } }, "meta": { "size": { "w": 4, "h": 4 } } }"#,
        )
        .unwrap();
        assert_eq!(meta.frames()[0].w as u64, MAX_FRAME_PIXELS);
    }

    #[test]
    fn test_zero_canvas() {
        assert_malformed(
            r#"{ "frames": { "a": { "frame": { "x": 0, "y": 0, "w": 1, "h": 1 } } }, "meta": { "size": { "w": 0, "h": 4 } } }"#,
        );
    }

    #[test]
    fn test_frames_array_rejected() {
        assert_malformed(
            r#"{ "frames": [ { "frame": { "x": 0, "y": 0, "w": 1, "h": 1 } } ], "meta": { "size": { "w": 4, "h": 4 } } }"#,
        );
    }

    #[test]
    fn test_parse_bytes() {
        assert_eq!(parse_metadata_bytes(SHEET.as_bytes()).unwrap().frame_count(), 3);
        assert!(matches!(
            parse_metadata_bytes(&[0xff, 0xfe, 0x00]),
            Err(SliceError::MalformedMetadata { .. })
        ));
    }
}
