//! Error types for shipwright-sync.

use std::path::PathBuf;

use thiserror::Error;

use shipwright_core::error::ConfigError;
use shipwright_render::RenderError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine (mirror README).
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An error from configuration or control-directory setup.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error (state file).
    #[error("state JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A directory walk failure below the project root.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An exclusion glob that does not compile.
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The `git` binary could not be spawned at all.
    #[error("failed to run git (is it installed?): {source}")]
    GitSpawn {
        #[source]
        source: std::io::Error,
    },

    /// A git command exited non-zero with no benign explanation.
    #[error("git {action} failed: {detail}")]
    Git { action: String, detail: String },

    /// A sync or mirror was requested without a configured remote.
    #[error("no remote configured; set sync.remote_url in shipwright.yaml")]
    RemoteMissing,
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
