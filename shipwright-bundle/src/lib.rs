//! Archive assembly: placeholder Android App Bundle and APK containers.
//!
//! This is not a real encoder. Staging writes fixed placeholder payloads
//! plus a rendered manifest, and the packer zips exactly what was staged,
//! paths relative to the staging root.
//!
//! - [`payload`] — the stub byte sequences
//! - [`staging`] — AAB/APK staging-tree writers
//! - [`archive`] — zip packing and [`ArchiveSummary`]
//! - [`error`] — [`BundleError`]

pub mod archive;
pub mod error;
pub mod payload;
pub mod staging;

pub use archive::{pack_dir, ArchiveSummary};
pub use error::BundleError;

use std::path::Path;

use shipwright_core::types::ReleaseConfig;

/// Assemble the placeholder AAB at `bundle.aab_output`.
///
/// Refuses up front when the configured keystore is missing. The staging
/// tree is removed after a successful pack.
pub fn assemble_aab(root: &Path, cfg: &ReleaseConfig) -> Result<ArchiveSummary, BundleError> {
    ensure_keystore(root, cfg)?;
    let staging = staging::stage_aab(root, cfg)?;
    let output = root.join(&cfg.bundle.aab_output);
    let summary = archive::pack_dir(&staging, &output)?;
    cleanup(&staging)?;
    tracing::info!(
        path = %summary.path.display(),
        entries = summary.entries.len(),
        "assembled app bundle"
    );
    Ok(summary)
}

/// Assemble the placeholder APK at `bundle.apk_output`.
pub fn assemble_apk(root: &Path, cfg: &ReleaseConfig) -> Result<ArchiveSummary, BundleError> {
    ensure_keystore(root, cfg)?;
    let staging = staging::stage_apk(root, cfg)?;
    let output = root.join(&cfg.bundle.apk_output);
    let summary = archive::pack_dir(&staging, &output)?;
    cleanup(&staging)?;
    tracing::info!(
        path = %summary.path.display(),
        entries = summary.entries.len(),
        "assembled apk"
    );
    Ok(summary)
}

fn ensure_keystore(root: &Path, cfg: &ReleaseConfig) -> Result<(), BundleError> {
    let path = root.join(&cfg.bundle.keystore);
    if path.exists() {
        Ok(())
    } else {
        Err(BundleError::KeystoreMissing { path })
    }
}

fn cleanup(staging: &Path) -> Result<(), BundleError> {
    std::fs::remove_dir_all(staging).map_err(|e| error::io_err(staging, e))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
