//! Parsers for spriteslice input documents.
//!
//! # Usage
//!
//! ```ignore
//! use spriteslice::parser::parse_metadata;
//!
//! let source = std::fs::read_to_string("hero.json")?;
//! let metadata = parse_metadata(&source)?;
//!
//! for frame in metadata.frames() {
//!     println!("{}: {}", frame.key, frame);
//! }
//! ```

mod metadata;

pub use metadata::{parse_metadata, parse_metadata_bytes, MAX_FRAME_PIXELS};
