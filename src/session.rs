//! Upload session state.
//!
//! A session joins the two independent uploads (metadata and sheet image)
//! and re-runs extraction in full whenever either changes. The state is a
//! single immutable [`SessionState`] value, swapped out wholesale on every
//! transition.
//!
//! Uploads are two-phase: `begin_*` hands out a [`Ticket`] when the upload
//! starts, and `load_*` commits the result once the bytes are read. Only the
//! most recently issued ticket for a slot can commit, so a slow upload that
//! finishes late never overwrites a newer one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::archive::{self, Archive};
use crate::error::{Result, SliceError};
use crate::output::format_size;
use crate::parser::parse_metadata_bytes;
use crate::render::{extract, previews, SpritePreview};
use crate::types::{base_file_name, ExtractedSprite, SheetMetadata, SourceImage};

/// File name and byte size of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadInfo {
    pub file_name: String,
    pub size: usize,
}

impl UploadInfo {
    pub fn new(file_name: impl Into<String>, size: usize) -> Self {
        Self {
            file_name: file_name.into(),
            size,
        }
    }

    /// Human readable size, e.g. "12.34 KB".
    pub fn size_label(&self) -> String {
        format_size(self.size)
    }
}

#[derive(Debug, Clone)]
struct MetadataUpload {
    info: UploadInfo,
    metadata: Arc<SheetMetadata>,
}

#[derive(Debug, Clone)]
struct ImageUpload {
    info: UploadInfo,
    image: Arc<SourceImage>,
}

/// Everything a session knows at one point in time.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    generation: u64,
    metadata: Option<MetadataUpload>,
    image: Option<ImageUpload>,
    base_name: String,
    sprites: Arc<Vec<ExtractedSprite>>,
}

impl SessionState {
    /// Replace the metadata and re-extract.
    pub fn with_metadata(&self, info: UploadInfo, metadata: SheetMetadata) -> Self {
        Self {
            generation: self.generation + 1,
            metadata: Some(MetadataUpload {
                info,
                metadata: Arc::new(metadata),
            }),
            image: self.image.clone(),
            base_name: self.base_name.clone(),
            sprites: Arc::default(),
        }
        .joined()
    }

    /// Replace the sheet image and re-extract. The base name follows the
    /// image's file name.
    pub fn with_image(&self, info: UploadInfo, image: SourceImage) -> Self {
        Self {
            generation: self.generation + 1,
            metadata: self.metadata.clone(),
            base_name: base_file_name(&info.file_name),
            image: Some(ImageUpload {
                info,
                image: Arc::new(image),
            }),
            sprites: Arc::default(),
        }
        .joined()
    }

    /// Drop both uploads and all sprites.
    pub fn reset(&self) -> Self {
        Self {
            generation: self.generation + 1,
            ..Self::default()
        }
    }

    /// Run extraction when both inputs are present.
    fn joined(mut self) -> Self {
        if let (Some(meta), Some(img)) = (&self.metadata, &self.image) {
            self.sprites = Arc::new(extract(&img.image, &meta.metadata, &self.base_name));
        }
        self
    }

    /// Bumped on every transition.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn metadata(&self) -> Option<&SheetMetadata> {
        self.metadata.as_ref().map(|m| m.metadata.as_ref())
    }

    pub fn metadata_upload(&self) -> Option<&UploadInfo> {
        self.metadata.as_ref().map(|m| &m.info)
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref().map(|i| i.image.as_ref())
    }

    pub fn image_upload(&self) -> Option<&UploadInfo> {
        self.image.as_ref().map(|i| &i.info)
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn sprites(&self) -> &[ExtractedSprite] {
        &self.sprites
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Metadata,
    Image,
}

/// Permission to commit one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    slot: Slot,
    id: u64,
}

/// Outcome of committing an upload.
#[derive(Debug, Clone)]
pub enum Applied {
    /// The upload was applied; this is the new state.
    Current(Arc<SessionState>),
    /// A newer upload (or a reset) superseded this one. Nothing changed.
    Stale,
}

impl Applied {
    pub fn is_stale(&self) -> bool {
        matches!(self, Applied::Stale)
    }
}

/// Shared session holding the current state.
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<Arc<SessionState>>,
    latest_metadata: AtomicU64,
    latest_image: AtomicU64,
    packing: AtomicBool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn snapshot(&self) -> Arc<SessionState> {
        Arc::clone(&self.lock())
    }

    /// Start a metadata upload. Invalidates any earlier metadata ticket.
    pub fn begin_metadata(&self) -> Ticket {
        Ticket {
            slot: Slot::Metadata,
            id: self.latest_metadata.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Start an image upload. Invalidates any earlier image ticket.
    pub fn begin_image(&self) -> Ticket {
        Ticket {
            slot: Slot::Image,
            id: self.latest_image.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Parse and commit a metadata upload.
    ///
    /// A superseded ticket yields `Stale` without parsing, even for bad
    /// bytes. On error the current state is left untouched.
    pub fn load_metadata(&self, ticket: Ticket, file_name: &str, bytes: &[u8]) -> Result<Applied> {
        if !self.is_latest(ticket) {
            return Ok(Applied::Stale);
        }
        let metadata = match parse_metadata_bytes(bytes) {
            Ok(metadata) => metadata,
            Err(_) if !self.is_latest(ticket) => return Ok(Applied::Stale),
            Err(e) => return Err(e),
        };
        let info = UploadInfo::new(file_name, bytes.len());
        Ok(self.commit(ticket, |state| state.with_metadata(info, metadata)))
    }

    /// Decode and commit an image upload.
    ///
    /// A superseded ticket yields `Stale` without decoding, even for bad
    /// bytes. On error the current state is left untouched.
    pub fn load_image(&self, ticket: Ticket, file_name: &str, bytes: &[u8]) -> Result<Applied> {
        if !self.is_latest(ticket) {
            return Ok(Applied::Stale);
        }
        let image = match SourceImage::decode(bytes) {
            Ok(image) => image,
            Err(_) if !self.is_latest(ticket) => return Ok(Applied::Stale),
            Err(e) => return Err(e),
        };
        let info = UploadInfo::new(file_name, bytes.len());
        Ok(self.commit(ticket, |state| state.with_image(info, image)))
    }

    /// Whether no newer upload (or reset) has been started for this slot.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        let latest = match ticket.slot {
            Slot::Metadata => &self.latest_metadata,
            Slot::Image => &self.latest_image,
        };
        latest.load(Ordering::SeqCst) == ticket.id
    }

    /// Clear the session. In-flight uploads become stale.
    pub fn reset(&self) -> Arc<SessionState> {
        let mut state = self.lock();
        self.latest_metadata.fetch_add(1, Ordering::SeqCst);
        self.latest_image.fetch_add(1, Ordering::SeqCst);
        *state = Arc::new(state.reset());
        Arc::clone(&state)
    }

    /// Encoded previews of the current sprites.
    pub fn previews(&self) -> Result<Vec<SpritePreview>> {
        previews(self.snapshot().sprites())
    }

    /// Claim the packing flag. Fails if a pack is already running.
    pub fn try_begin_pack(&self) -> Result<PackGuard<'_>> {
        self.packing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SliceError::PackInProgress)?;
        Ok(PackGuard { flag: &self.packing })
    }

    pub fn is_packing(&self) -> bool {
        self.packing.load(Ordering::Acquire)
    }

    /// Pack the current sprites into an archive named after the sheet.
    pub fn pack(&self) -> Result<Archive> {
        let _guard = self.try_begin_pack()?;
        let state = self.snapshot();
        if state.sprites().is_empty() {
            return Err(SliceError::NothingToPack);
        }
        archive::pack(state.sprites(), state.base_name())
    }

    fn commit(&self, ticket: Ticket, transition: impl FnOnce(&SessionState) -> SessionState) -> Applied {
        let mut state = self.lock();
        if !self.is_latest(ticket) {
            return Applied::Stale;
        }

        *state = Arc::new(transition(&state));
        Applied::Current(Arc::clone(&state))
    }

    fn lock(&self) -> MutexGuard<'_, Arc<SessionState>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the packing flag; released on drop.
#[derive(Debug)]
pub struct PackGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for PackGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
