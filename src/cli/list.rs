//! List command implementation.
//!
//! Prints a metadata file's summary and its frames in document order.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, format_size, plural, Printer};
use crate::parser::parse_metadata_bytes;
use crate::render::clipped_regions;
use crate::types::{SheetMetadata, SourceImage};

use super::slice::read_input;

/// List the frames in a metadata file
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Metadata file (TexturePacker JSON Hash)
    #[arg(required = true)]
    pub metadata: PathBuf,

    /// Sheet image to check frame bounds against
    #[arg(long)]
    pub image: Option<PathBuf>,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let bytes = read_input(&args.metadata)?;
    let metadata = parse_metadata_bytes(&bytes)?;

    printer.info(
        "Metadata",
        &format!("{} ({})", display_path(&args.metadata), format_size(bytes.len())),
    );
    printer.info("Frames", &plural(metadata.frame_count(), "frame", "frames"));
    printer.info("Canvas", &metadata.canvas_size().to_string());

    let clipped: Vec<usize> = match &args.image {
        Some(path) => {
            let image_bytes = read_input(path)?;
            let image = SourceImage::decode(&image_bytes)?;
            printer.info(
                "Image",
                &format!(
                    "{} ({}x{}, {})",
                    display_path(path),
                    image.width(),
                    image.height(),
                    format_size(image_bytes.len())
                ),
            );
            if !metadata.canvas_matches(image.width(), image.height()) {
                printer.warning("Warning", "declared canvas does not match the image");
            }
            clipped_regions(&image, &metadata)
                .into_iter()
                .map(|c| c.index)
                .collect()
        }
        None => Vec::new(),
    };

    for line in frame_lines(&metadata, &clipped) {
        printer.info("", &line);
    }

    Ok(())
}

/// One line per frame: `#<index> <key>  <w>x<h> at (<x>, <y>)`.
fn frame_lines(metadata: &SheetMetadata, clipped: &[usize]) -> Vec<String> {
    let key_width = metadata
        .frames()
        .iter()
        .map(|f| f.key.chars().count())
        .max()
        .unwrap_or(0);

    metadata
        .frames()
        .iter()
        .map(|f| {
            let mut line = format!("#{:<3} {:<key_width$}  {}", f.index, f.key, f);
            if clipped.contains(&f.index) {
                line.push_str("  (clipped)");
            }
            line
        })
        .collect()
}
