//! Error types for shipwright-bundle.

use std::path::PathBuf;

use thiserror::Error;

use shipwright_render::RenderError;

/// All errors that can arise from archive assembly.
#[derive(Debug, Error)]
pub enum BundleError {
    /// An error rendering the Android manifest.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Bundle metadata serialization error.
    #[error("metadata JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A directory walk failure below the staging root.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Assembly refused because the signing keystore is absent.
    #[error(
        "keystore not found at {path}; generate one with `keytool -genkeypair -keystore {path} -alias release`",
        path = .path.display()
    )]
    KeystoreMissing { path: PathBuf },
}

/// Convenience constructor for [`BundleError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BundleError {
    BundleError::Io {
        path: path.into(),
        source,
    }
}
