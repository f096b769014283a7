use std::path::PathBuf;
use thiserror::Error;

use crate::export::ExportFormat;

/// Broad category of a failure, as surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ImageLoad,
    ImageSave,
}

/// Errors raised by user-triggered image operations
#[derive(Debug, Error)]
pub enum DecoratorError {
    #[error("Failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {format:?} image: {source}")]
    Encode {
        format: ExportFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Canvas has no renderable area ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },
}

impl DecoratorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ImageLoad { .. } => ErrorKind::ImageLoad,
            Self::Encode { .. } | Self::Write { .. } | Self::EmptyCanvas { .. } => {
                ErrorKind::ImageSave
            }
        }
    }
}

/// Result type for image operations
pub type Result<T> = std::result::Result<T, DecoratorError>;
