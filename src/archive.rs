//! Zip packaging for extracted sprites.
//!
//! Every sprite is encoded as PNG and stored as `<archive_name>/<i>.png`,
//! where `i` is its position in the input. The sprite's display name is not
//! used inside the archive. Nothing is handed back unless every entry was
//! written.

use std::io::{Cursor, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, SliceError};
use crate::render::encode_sprite;
use crate::types::ExtractedSprite;

/// A finished archive and the file name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Encode `sprites` and pack them into a deflate-compressed zip.
///
/// An empty `archive_name` puts the entries at the archive root.
pub fn pack(sprites: &[ExtractedSprite], archive_name: &str) -> Result<Archive> {
    validate_archive_name(archive_name)?;

    // Encode up front so a bad sprite aborts before anything is written.
    let encoded = sprites
        .iter()
        .map(encode_sprite)
        .collect::<Result<Vec<_>>>()?;

    let prefix = if archive_name.is_empty() {
        String::new()
    } else {
        format!("{}/", archive_name)
    };

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    if !prefix.is_empty() {
        writer
            .add_directory(prefix.as_str(), options)
            .map_err(archive_error)?;
    }

    for (index, png) in encoded.iter().enumerate() {
        writer
            .start_file(format!("{}{}.png", prefix, index), options)
            .map_err(archive_error)?;
        writer
            .write_all(png)
            .map_err(|e| archive_error(ZipError::Io(e)))?;
    }

    let cursor = writer.finish().map_err(archive_error)?;

    Ok(Archive {
        file_name: format!("{}.zip", archive_name),
        bytes: cursor.into_inner(),
    })
}

/// Archive names must be a single path segment.
fn validate_archive_name(name: &str) -> Result<()> {
    let invalid = name == "."
        || name == ".."
        || name.contains(|c: char| c == '/' || c == '\\' || c == '\0');

    if invalid {
        return Err(SliceError::ArchiveCreation {
            message: format!("'{}' is not a valid archive directory name", name.escape_default()),
            help: Some("Use a plain name without path separators".to_string()),
        });
    }
    Ok(())
}

fn archive_error(e: ZipError) -> SliceError {
    SliceError::ArchiveCreation {
        message: e.to_string(),
        help: None,
    }
}
