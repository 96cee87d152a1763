//! Shipwright core library — configuration types, persistence, path helpers.
//!
//! Public API surface:
//! - [`types`] — the `ReleaseConfig` sections passed into every operation
//! - [`config`] — `shipwright.yaml` load / save
//! - [`paths`] — `.shipwright/` control-directory helpers
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod paths;
pub mod types;

pub use error::ConfigError;
pub use types::{
    AppConfig, MediaConfig, PackagingConfig, ReleaseConfig, RenderConfig, ScreenshotSpec,
    SyncConfig,
};
