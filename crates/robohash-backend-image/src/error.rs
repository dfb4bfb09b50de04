//! Errors from asset loading and rendering.

use robohash_core::{BackendError, RobohashError};
use thiserror::Error;

/// Errors from the image backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("asset not found: {0}")]
    AssetNotFound(String),

    #[error("invalid asset path for token '{token}': {reason}")]
    InvalidAssetPath { token: String, reason: String },

    #[error("PNG decode error for '{token}': {source}")]
    PngDecode {
        token: String,
        #[source]
        source: png::DecodingError,
    },

    #[error("PNG encoding error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("nothing to render: selection has no parts")]
    EmptySelection,

    #[error("asset worker panicked while loading '{0}'")]
    WorkerPanicked(String),

    #[error(transparent)]
    Core(#[from] RobohashError),
}

impl BackendError for RenderError {
    fn code(&self) -> &'static str {
        match self {
            RenderError::Io(_) => "IMAGE_001",
            RenderError::AssetNotFound(_) => "IMAGE_002",
            RenderError::InvalidAssetPath { .. } => "IMAGE_003",
            RenderError::PngDecode { .. } => "IMAGE_004",
            RenderError::PngEncode(_) => "IMAGE_005",
            RenderError::InvalidDimensions(_) => "IMAGE_006",
            RenderError::EmptySelection => "IMAGE_007",
            RenderError::WorkerPanicked(_) => "IMAGE_008",
            RenderError::Core(err) => err.code().code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            RenderError::Core(_) => "core",
            _ => "image",
        }
    }
}
