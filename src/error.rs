use miette::Diagnostic;
use thiserror::Error;

/// Main error type for spriteslice operations
#[derive(Error, Diagnostic, Debug)]
pub enum SliceError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(spriteslice::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Malformed metadata: {message}")]
    #[diagnostic(code(spriteslice::metadata))]
    MalformedMetadata {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to decode image: {message}")]
    #[diagnostic(
        code(spriteslice::decode),
        help("PNG, JPEG, GIF, BMP and WebP sheets are supported")
    )]
    ImageDecode { message: String },

    #[error("Failed to create archive: {message}")]
    #[diagnostic(code(spriteslice::archive))]
    ArchiveCreation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to encode sprite {index}: {message}")]
    #[diagnostic(code(spriteslice::encode))]
    Encoding { index: usize, message: String },

    #[error("An archive is already being generated")]
    #[diagnostic(code(spriteslice::busy))]
    PackInProgress,

    #[error("Nothing to pack: no sprites have been extracted")]
    #[diagnostic(
        code(spriteslice::empty),
        help("Load both a metadata file and a sheet image first")
    )]
    NothingToPack,

    #[error("Config error: {message}")]
    #[diagnostic(code(spriteslice::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl SliceError {
    /// Shorthand for a `MalformedMetadata` error without help text.
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        SliceError::MalformedMetadata {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SliceError>;
