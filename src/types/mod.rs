//! Core domain types for spriteslice.
//!
//! - `FrameRegion` / `SheetMetadata` - parsed frame rectangles
//! - `SourceImage` - a decoded sheet
//! - `ExtractedSprite` - an owned sprite cut from a sheet

mod frame;
mod sprite;

pub use frame::{CanvasSize, FrameRegion, SheetMetadata};
pub use sprite::{base_file_name, ExtractedSprite, SourceImage};
