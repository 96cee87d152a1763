//! Generated store assets: launcher icons, screenshots, and the feature
//! graphic, painted from the release config.
//!
//! - [`canvas`] — hex color parsing and shape primitives
//! - [`font`] — the built-in 5x7 pixel font
//! - [`icon`] — launcher icon painter and density fan-out
//! - [`screenshot`] — phone-portrait store screenshots
//! - [`graphic`] — the 1024x500 feature graphic
//!
//! Painters are pure functions of config values. Regenerating with the
//! same config produces byte-identical PNGs, so generated assets diff
//! cleanly in release trees.

pub mod canvas;
pub mod error;
pub mod font;
pub mod graphic;
pub mod icon;
pub mod screenshot;

use std::path::{Path, PathBuf};

use shipwright_core::ReleaseConfig;
use tracing::info;

pub use canvas::Palette;
pub use error::MediaError;
pub use graphic::write_feature_graphic;
pub use icon::{write_launcher_icons, write_store_icon};
pub use screenshot::write_screenshots;

/// Generate every asset the release tree needs: launcher icons at all
/// densities, the splash drawable, the store icon, one screenshot per
/// spec, and the feature graphic. Returns the written paths.
pub fn write_all(root: &Path, cfg: &ReleaseConfig) -> Result<Vec<PathBuf>, MediaError> {
    let mut written = icon::write_launcher_icons(root, cfg)?;
    written.push(icon::write_store_icon(root, cfg)?);
    written.extend(screenshot::write_screenshots(root, cfg)?);
    written.push(graphic::write_feature_graphic(root, cfg)?);
    info!(count = written.len(), "store assets generated");
    Ok(written)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_all_covers_icons_screenshots_and_banner() {
        let tmp = TempDir::new().expect("tempdir");
        let cfg = ReleaseConfig::default();
        let written = write_all(tmp.path(), &cfg).expect("assets");

        // 5 densities x 2 variants, splash, store icon, 2 screenshots, banner.
        assert_eq!(written.len(), 15);
        for path in &written {
            assert!(path.is_file(), "missing {}", path.display());
        }
        assert!(written
            .iter()
            .any(|p| p.ends_with("store-assets/feature_graphic.png")));
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let tmp = TempDir::new().expect("tempdir");
        let cfg = ReleaseConfig::default();

        let first = write_all(tmp.path(), &cfg).expect("assets");
        let mut before = Vec::new();
        for path in &first {
            before.push(std::fs::read(path).expect("readable"));
        }

        let second = write_all(tmp.path(), &cfg).expect("assets again");
        assert_eq!(first, second);
        for (path, old) in second.iter().zip(before) {
            let new = std::fs::read(path).expect("readable");
            assert_eq!(new, old, "{} changed between runs", path.display());
        }
    }
}
