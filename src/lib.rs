//! spriteslice - Sprite sheet slicer
//!
//! Parses TexturePacker-style frame metadata, cuts each frame out of the
//! decoded sheet and packs the sprites into a zip archive.
//!
//! ```ignore
//! use spriteslice::{extract, pack, parse_metadata, SourceImage};
//!
//! let metadata = parse_metadata(&std::fs::read_to_string("hero.json")?)?;
//! let image = SourceImage::decode(&std::fs::read("hero.png")?)?;
//! let sprites = extract(&image, &metadata, "hero");
//! let archive = pack(&sprites, "hero")?;
//! std::fs::write(&archive.file_name, &archive.bytes)?;
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod render;
pub mod session;
pub mod types;

pub use archive::{pack, Archive};
pub use config::Config;
pub use error::{Result, SliceError};
pub use parser::{parse_metadata, parse_metadata_bytes};
pub use render::{clipped_regions, encode_png, extract, previews, ClippedRegion, SpritePreview};
pub use session::{Applied, Session, SessionState, Ticket, UploadInfo};
pub use types::{base_file_name, CanvasSize, ExtractedSprite, FrameRegion, SheetMetadata, SourceImage};
