//! Rendering module for spriteslice.
//!
//! Cuts frames out of a decoded sheet and encodes them as PNG.

mod extract;
mod png;

pub use extract::{clipped_regions, extract, ClippedRegion};
pub use png::{encode_png, encode_sprite, previews, write_png, SpritePreview};
