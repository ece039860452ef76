//! Slice command implementation.
//!
//! Cuts a sprite sheet into one PNG per metadata frame and zips them.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::archive::pack;
use crate::config::Config;
use crate::error::{Result, SliceError};
use crate::output::{display_path, plural, Printer};
use crate::parser::parse_metadata_bytes;
use crate::render::{clipped_regions, extract, write_png};
use crate::types::{base_file_name, SourceImage};

/// Slice a sprite sheet into individual sprites
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// Metadata file (TexturePacker JSON Hash)
    #[arg(required = true)]
    pub metadata: PathBuf,

    /// Sprite sheet image
    #[arg(required = true)]
    pub image: PathBuf,

    /// Output directory (default: from spriteslice.yaml, else dist)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Base name for sprites and the archive (default: image file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Also write each sprite as a loose PNG
    #[arg(long)]
    pub png: bool,
}

/// Run the slice command. Returns the path of the written archive.
pub fn run(args: SliceArgs, config: &Config, printer: &Printer) -> Result<PathBuf> {
    let metadata_bytes = read_input(&args.metadata)?;
    let metadata = parse_metadata_bytes(&metadata_bytes)?;
    printer.status(
        "Parsed",
        &format!(
            "{} ({}, canvas {})",
            display_path(&args.metadata),
            plural(metadata.frame_count(), "frame", "frames"),
            metadata.canvas_size()
        ),
    );

    let image_bytes = read_input(&args.image)?;
    let image = SourceImage::decode(&image_bytes)?;
    printer.status(
        "Loaded",
        &format!("{} ({}x{})", display_path(&args.image), image.width(), image.height()),
    );

    if !metadata.canvas_matches(image.width(), image.height()) {
        printer.warning(
            "Warning",
            &format!(
                "metadata declares a {} canvas but the image is {}x{}",
                metadata.canvas_size(),
                image.width(),
                image.height()
            ),
        );
    }

    for clipped in clipped_regions(&image, &metadata) {
        printer.warning(
            "Clipped",
            &format!(
                "frame {} '{}' ({}x{}) extends past the image; {}x{} copied, rest left transparent",
                clipped.index,
                clipped.key,
                clipped.declared.0,
                clipped.declared.1,
                clipped.copied.0,
                clipped.copied.1
            ),
        );
    }

    let base_name = args
        .name
        .clone()
        .or_else(|| config.name.clone())
        .unwrap_or_else(|| {
            let file_name = args
                .image
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            base_file_name(&file_name)
        });

    let sprites = extract(&image, &metadata, &base_name);
    let archive = pack(&sprites, &base_name)?;

    let output = args.output.clone().unwrap_or_else(|| config.output.clone());
    fs::create_dir_all(&output).map_err(|e| SliceError::Io {
        path: output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    if args.png || config.png {
        for sprite in &sprites {
            let path = output.join(format!("{}.png", sprite.name));
            write_png(sprite, &path)?;
            printer.info("Wrote", &display_path(&path));
        }
    }

    let archive_path = output.join(&archive.file_name);
    fs::write(&archive_path, &archive.bytes).map_err(|e| SliceError::Io {
        path: archive_path.clone(),
        message: format!("Failed to write archive: {}", e),
    })?;

    printer.status(
        "Finished",
        &format!(
            "{} -> {}",
            plural(sprites.len(), "sprite", "sprites"),
            display_path(&archive_path)
        ),
    );

    Ok(archive_path)
}

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| SliceError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::encode_png;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;
    use zip::ZipArchive;

    const METADATA: &str = r#"{
        "frames": {
            "b": { "frame": { "x": 2, "y": 0, "w": 2, "h": 2 } },
            "a": { "frame": { "x": 0, "y": 0, "w": 2, "h": 2 } },
            "c": { "frame": { "x": 3, "y": 1, "w": 2, "h": 2 } }
        },
        "meta": { "size": { "w": 4, "h": 2 } }
    }"#;

    fn quiet() -> Printer {
        Printer::new().quiet(true)
    }

    fn setup(dir: &Path) -> SliceArgs {
        let metadata = dir.join("hero.json");
        let image = dir.join("hero.png");
        fs::write(&metadata, METADATA).unwrap();
        let sheet = RgbaImage::from_fn(4, 2, |x, _| Rgba([x as u8 * 60, 0, 0, 255]));
        fs::write(&image, encode_png(&sheet).unwrap()).unwrap();

        SliceArgs {
            metadata,
            image,
            output: Some(dir.join("out")),
            name: None,
            png: false,
        }
    }

    fn entries(path: &Path) -> Vec<String> {
        let bytes = fs::read(path).unwrap();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_slice_writes_archive() {
        let dir = tempdir().unwrap();
        let args = setup(dir.path());

        let path = run(args, &Config::default(), &quiet()).unwrap();

        assert_eq!(path, dir.path().join("out").join("hero.zip"));
        assert_eq!(
            entries(&path),
            vec!["hero/", "hero/0.png", "hero/1.png", "hero/2.png"]
        );
    }

    #[test]
    fn test_slice_name_override() {
        let dir = tempdir().unwrap();
        let mut args = setup(dir.path());
        args.name = Some("knight".to_string());

        let path = run(args, &Config::default(), &quiet()).unwrap();
        assert_eq!(path.file_name().unwrap(), "knight.zip");
        assert_eq!(entries(&path)[1], "knight/0.png");
    }

    #[test]
    fn test_slice_config_defaults() {
        let dir = tempdir().unwrap();
        let mut args = setup(dir.path());
        args.output = None;
        let config = Config {
            output: dir.path().join("from-config"),
            name: Some("cfg".to_string()),
            png: true,
        };

        let path = run(args, &config, &quiet()).unwrap();
        assert_eq!(path, dir.path().join("from-config").join("cfg.zip"));
        assert!(dir.path().join("from-config").join("cfg_0.png").exists());
    }

    #[test]
    fn test_slice_loose_pngs() {
        let dir = tempdir().unwrap();
        let mut args = setup(dir.path());
        args.png = true;

        run(args, &Config::default(), &quiet()).unwrap();

        let out = dir.path().join("out");
        for name in ["hero_0.png", "hero_1.png", "hero_2.png"] {
            assert!(out.join(name).exists(), "{} missing", name);
        }

        // Frame "b" comes first in the document.
        let first = image::open(out.join("hero_0.png")).unwrap().to_rgba8();
        assert_eq!(first.get_pixel(0, 0).0, [120, 0, 0, 255]);

        // Frame "c" is clipped: only its top-left-most column/row is covered.
        let clipped = image::open(out.join("hero_2.png")).unwrap().to_rgba8();
        assert_eq!(clipped.dimensions(), (2, 2));
        assert_eq!(clipped.get_pixel(0, 0).0, [180, 0, 0, 255]);
        assert_eq!(clipped.get_pixel(1, 0).0, [0, 0, 0, 0]);
        assert_eq!(clipped.get_pixel(0, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_slice_missing_metadata() {
        let dir = tempdir().unwrap();
        let mut args = setup(dir.path());
        args.metadata = dir.path().join("missing.json");

        let err = run(args, &Config::default(), &quiet()).unwrap_err();
        assert!(matches!(err, SliceError::Io { .. }));
    }

    #[test]
    fn test_slice_malformed_metadata_writes_nothing() {
        let dir = tempdir().unwrap();
        let args = setup(dir.path());
        fs::write(&args.metadata, r#"{ "frames": {} }"#).unwrap();

        let err = run(args, &Config::default(), &quiet()).unwrap_err();
        assert!(matches!(err, SliceError::MalformedMetadata { .. }));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_slice_undecodable_image() {
        let dir = tempdir().unwrap();
        let args = setup(dir.path());
        fs::write(&args.image, b"not a png").unwrap();

        let err = run(args, &Config::default(), &quiet()).unwrap_err();
        assert!(matches!(err, SliceError::ImageDecode { .. }));
    }
}
