//! Staging-tree writers.
//!
//! # AAB layout (`<staging_dir>/bundle/`)
//!
//! ```text
//! bundle/
//!   BundleConfig.pb
//!   BUNDLE-METADATA/
//!     com.android.tools.build.gradle
//!   base/
//!     manifest/AndroidManifest.xml    (rendered)
//!     resources.pb
//!     native.pb
//!     dex/  res/  assets/  lib/       (created empty)
//! ```
//!
//! # APK layout (`<staging_dir>/apk/`)
//!
//! ```text
//! apk/
//!   AndroidManifest.xml               (rendered)
//!   classes.dex
//!   resources.arsc
//!   META-INF/  res/  assets/          (created empty)
//! ```
//!
//! Empty directories are layout scaffolding only; the packer archives
//! files, so they never appear in outputs. Any previous staging tree is
//! wiped first.

use std::path::{Path, PathBuf};

use shipwright_core::types::ReleaseConfig;
use shipwright_render::{engine_for, DocKind, ReleaseContext};

use crate::error::{io_err, BundleError};
use crate::payload;

/// Write the AAB staging tree; returns its root.
pub fn stage_aab(root: &Path, cfg: &ReleaseConfig) -> Result<PathBuf, BundleError> {
    let staging = root.join(&cfg.bundle.staging_dir).join("bundle");
    reset_dir(&staging)?;

    let base = staging.join("base");
    for dir in [
        base.join("manifest"),
        base.join("dex"),
        base.join("res"),
        base.join("assets"),
        base.join("lib"),
        staging.join("BUNDLE-METADATA"),
    ] {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    }

    let manifest = render_manifest(root, cfg)?;
    write_file(
        &base.join("manifest").join("AndroidManifest.xml"),
        manifest.as_bytes(),
    )?;
    write_file(&staging.join("BundleConfig.pb"), payload::BUNDLE_CONFIG_PB)?;
    write_file(&base.join("resources.pb"), payload::RESOURCES_PB)?;
    write_file(&base.join("native.pb"), payload::NATIVE_PB)?;

    let metadata = serde_json::to_string(&serde_json::json!({
        "version": payload::GRADLE_VERSION,
    }))?;
    write_file(
        &staging
            .join("BUNDLE-METADATA")
            .join("com.android.tools.build.gradle"),
        metadata.as_bytes(),
    )?;

    tracing::debug!(staging = %staging.display(), "aab staging tree written");
    Ok(staging)
}

/// Write the APK staging tree; returns its root.
pub fn stage_apk(root: &Path, cfg: &ReleaseConfig) -> Result<PathBuf, BundleError> {
    let staging = root.join(&cfg.bundle.staging_dir).join("apk");
    reset_dir(&staging)?;

    for dir in [
        staging.join("META-INF"),
        staging.join("res"),
        staging.join("assets"),
    ] {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    }

    let manifest = render_manifest(root, cfg)?;
    write_file(&staging.join("AndroidManifest.xml"), manifest.as_bytes())?;
    write_file(&staging.join("classes.dex"), &payload::classes_dex_stub())?;
    write_file(&staging.join("resources.arsc"), payload::RESOURCES_ARSC)?;

    tracing::debug!(staging = %staging.display(), "apk staging tree written");
    Ok(staging)
}

fn render_manifest(root: &Path, cfg: &ReleaseConfig) -> Result<String, BundleError> {
    let engine = engine_for(root, cfg)?;
    Ok(engine.render(DocKind::Manifest, &ReleaseContext::from_config(cfg))?)
}

fn reset_dir(dir: &Path) -> Result<(), BundleError> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), BundleError> {
    std::fs::write(path, bytes).map_err(|e| io_err(path, e))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn aab_staging_has_the_documented_layout() {
        let root = TempDir::new().expect("tempdir");
        let cfg = ReleaseConfig::default();

        let staging = stage_aab(root.path(), &cfg).expect("stage");
        assert_eq!(staging, root.path().join("build").join("bundle"));

        for file in [
            "BundleConfig.pb",
            "BUNDLE-METADATA/com.android.tools.build.gradle",
            "base/manifest/AndroidManifest.xml",
            "base/resources.pb",
            "base/native.pb",
        ] {
            assert!(staging.join(file).is_file(), "missing {file}");
        }
        for dir in ["base/dex", "base/res", "base/assets", "base/lib"] {
            assert!(staging.join(dir).is_dir(), "missing dir {dir}");
        }

        let config_pb = std::fs::read(staging.join("BundleConfig.pb")).expect("read");
        assert_eq!(config_pb, payload::BUNDLE_CONFIG_PB);
    }

    #[test]
    fn aab_manifest_is_rendered_from_config() {
        let root = TempDir::new().expect("tempdir");
        let mut cfg = ReleaseConfig::default();
        cfg.app.package = "com.acme.meals".to_string();

        let staging = stage_aab(root.path(), &cfg).expect("stage");
        let manifest = std::fs::read_to_string(
            staging.join("base").join("manifest").join("AndroidManifest.xml"),
        )
        .expect("read manifest");
        assert!(manifest.contains(r#"package="com.acme.meals""#));
    }

    #[test]
    fn apk_staging_keeps_the_manifest_at_the_root() {
        let root = TempDir::new().expect("tempdir");
        let cfg = ReleaseConfig::default();

        let staging = stage_apk(root.path(), &cfg).expect("stage");
        assert!(staging.join("AndroidManifest.xml").is_file());
        assert!(staging.join("classes.dex").is_file());
        assert!(staging.join("resources.arsc").is_file());
        assert!(staging.join("META-INF").is_dir());

        let dex = std::fs::read(staging.join("classes.dex")).expect("read");
        assert_eq!(dex, payload::classes_dex_stub());
    }

    #[test]
    fn restaging_wipes_stale_files() {
        let root = TempDir::new().expect("tempdir");
        let cfg = ReleaseConfig::default();

        let staging = stage_aab(root.path(), &cfg).expect("first stage");
        std::fs::write(staging.join("stale.bin"), b"leftover").expect("write stale");

        let staging = stage_aab(root.path(), &cfg).expect("second stage");
        assert!(!staging.join("stale.bin").exists());
    }

    #[test]
    fn metadata_file_is_valid_json() {
        let root = TempDir::new().expect("tempdir");
        let staging = stage_aab(root.path(), &ReleaseConfig::default()).expect("stage");
        let raw = std::fs::read_to_string(
            staging
                .join("BUNDLE-METADATA")
                .join("com.android.tools.build.gradle"),
        )
        .expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
        assert_eq!(value["version"], payload::GRADLE_VERSION);
    }
}
