//! Subcommand implementations for the `shipwright` binary.

pub mod assets;
pub mod bundle;
pub mod init;
pub mod mirror;
pub mod status;
pub mod sync;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use shipwright_core::{config, ReleaseConfig};

/// The project root every command operates on.
pub(crate) fn project_root() -> Result<PathBuf> {
    std::env::current_dir().context("could not determine current directory")
}

/// Load `shipwright.yaml` from `root`; a missing file yields defaults.
pub(crate) fn load_config(root: &Path) -> Result<ReleaseConfig> {
    config::load_from(root)
        .with_context(|| format!("failed to load {}", config::config_path(root).display()))
}

/// Leading digest characters shown in human-readable output.
pub(crate) fn short_digest(digest: &str) -> &str {
    &digest[..digest.len().min(12)]
}
