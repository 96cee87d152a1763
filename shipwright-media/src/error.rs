//! Error types for asset generation.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while painting or writing store assets.
#[derive(Debug, Error)]
pub enum MediaError {
    /// A palette entry is not a `#rrggbb` hex color.
    #[error("invalid color {value:?}: expected #rrggbb")]
    Color { value: String },

    /// Filesystem error with the offending path attached.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding error from the image backend.
    #[error("image error at {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub(crate) fn io_err(path: &Path, source: std::io::Error) -> MediaError {
    MediaError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn image_err(path: &Path, source: image::ImageError) -> MediaError {
    MediaError::Image {
        path: path.to_path_buf(),
        source,
    }
}
