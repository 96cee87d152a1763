//! Launcher icon painter and the per-density fan-out.
//!
//! One square painter produces every size; the writers place copies at
//! the Android mipmap densities, the splash drawable, and the 512 px
//! store listing icon:
//!
//! ```text
//! <res_dir>/
//! ├── mipmap-mdpi/ic_launcher.png        48 px (each density also gets
//! ├── mipmap-hdpi/ic_launcher.png        72 px  an ic_launcher_round.png)
//! ├── mipmap-xhdpi/ic_launcher.png       96 px
//! ├── mipmap-xxhdpi/ic_launcher.png     144 px
//! ├── mipmap-xxxhdpi/ic_launcher.png    192 px
//! └── drawable/splash_logo.png          512 px
//! <assets_dir>/
//! └── ic_launcher_512.png               512 px
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use shipwright_core::ReleaseConfig;
use tracing::debug;

use crate::canvas::{self, Palette};
use crate::error::{image_err, io_err, MediaError};
use crate::font;

/// Android density buckets and their launcher icon edge lengths.
pub const DENSITIES: &[(&str, u32)] = &[
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

pub const SPLASH_SIZE: u32 = 512;
pub const STORE_ICON_SIZE: u32 = 512;

/// Paint one square icon: accent disc on the brand background, a
/// foreground ring, a detail stroke, and the app monogram near the
/// bottom of the disc.
pub fn paint_icon(size: u32, palette: &Palette, monogram: char) -> RgbaImage {
    let mut img = canvas::solid(size, size, palette.background);
    let edge = i64::from(size);
    let margin = edge / 10;
    let center = edge / 2;
    let radius = center - margin;

    canvas::fill_circle(&mut img, center, center, radius, palette.accent);
    canvas::draw_ring(
        &mut img,
        center,
        center,
        radius,
        (edge / 64).max(2),
        palette.foreground,
    );

    // Detail stroke across the upper third of the disc.
    let stroke = (edge / 128).max(1);
    canvas::fill_rect(
        &mut img,
        center - radius / 2,
        edge / 3,
        radius,
        stroke,
        palette.background,
    );

    let scale = (size / 56).max(1);
    let text = monogram.to_string();
    let x = center - i64::from(font::text_width(&text, scale)) / 2;
    let y = edge - margin - i64::from(font::text_height(scale)) - edge / 20;
    font::draw_text(&mut img, &text, x, y, scale, palette.foreground);
    img
}

/// Write `ic_launcher.png` and `ic_launcher_round.png` at every density
/// plus the splash drawable. Returns the written paths.
pub fn write_launcher_icons(root: &Path, cfg: &ReleaseConfig) -> Result<Vec<PathBuf>, MediaError> {
    let palette = Palette::from_config(&cfg.media)?;
    let monogram = cfg.app.monogram();
    let res_dir = root.join(&cfg.media.res_dir);
    let mut written = Vec::new();

    for (density, size) in DENSITIES {
        let dir = res_dir.join(format!("mipmap-{density}"));
        fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        let icon = paint_icon(*size, &palette, monogram);
        for name in ["ic_launcher.png", "ic_launcher_round.png"] {
            let path = dir.join(name);
            icon.save(&path).map_err(|e| image_err(&path, e))?;
            written.push(path);
        }
        debug!(density, size, "launcher icon written");
    }

    let drawable = res_dir.join("drawable");
    fs::create_dir_all(&drawable).map_err(|e| io_err(&drawable, e))?;
    let splash_path = drawable.join("splash_logo.png");
    paint_icon(SPLASH_SIZE, &palette, monogram)
        .save(&splash_path)
        .map_err(|e| image_err(&splash_path, e))?;
    written.push(splash_path);
    Ok(written)
}

/// Write the 512 px store listing icon into the assets dir.
pub fn write_store_icon(root: &Path, cfg: &ReleaseConfig) -> Result<PathBuf, MediaError> {
    let palette = Palette::from_config(&cfg.media)?;
    let assets_dir = root.join(&cfg.media.assets_dir);
    fs::create_dir_all(&assets_dir).map_err(|e| io_err(&assets_dir, e))?;
    let path = assets_dir.join("ic_launcher_512.png");
    paint_icon(STORE_ICON_SIZE, &palette, cfg.app.monogram())
        .save(&path)
        .map_err(|e| image_err(&path, e))?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use tempfile::TempDir;

    fn palette() -> Palette {
        Palette::from_config(&shipwright_core::MediaConfig::default()).expect("default palette")
    }

    #[test]
    fn icon_has_background_corners_and_accent_center() {
        let palette = palette();
        let icon = paint_icon(96, &palette, 'E');
        assert_eq!(icon.dimensions(), (96, 96));
        assert_eq!(*icon.get_pixel(0, 0), palette.background);
        assert_eq!(*icon.get_pixel(95, 0), palette.background);
        assert_eq!(*icon.get_pixel(48, 48), palette.accent);
    }

    #[test]
    fn painting_is_deterministic() {
        let palette = palette();
        let a = paint_icon(144, &palette, 'E').into_raw();
        let b = paint_icon(144, &palette, 'E').into_raw();
        assert_eq!(a, b);
    }

    #[test]
    fn monogram_changes_pixels() {
        let palette = palette();
        let a = paint_icon(192, &palette, 'E').into_raw();
        let b = paint_icon(192, &palette, 'W').into_raw();
        assert_ne!(a, b);
    }

    #[test]
    fn writes_every_density_round_variant_and_splash() {
        let tmp = TempDir::new().expect("tempdir");
        let cfg = ReleaseConfig::default();
        let written = write_launcher_icons(tmp.path(), &cfg).expect("icons");

        assert_eq!(written.len(), DENSITIES.len() * 2 + 1);
        for (density, _) in DENSITIES {
            for name in ["ic_launcher.png", "ic_launcher_round.png"] {
                let path = tmp
                    .path()
                    .join(&cfg.media.res_dir)
                    .join(format!("mipmap-{density}"))
                    .join(name);
                assert!(path.is_file(), "missing {}", path.display());
            }
        }
        let splash = tmp
            .path()
            .join(&cfg.media.res_dir)
            .join("drawable/splash_logo.png");
        assert!(splash.is_file());
    }

    #[test]
    fn written_density_sizes_match_table() {
        let tmp = TempDir::new().expect("tempdir");
        let cfg = ReleaseConfig::default();
        write_launcher_icons(tmp.path(), &cfg).expect("icons");

        for (density, size) in DENSITIES {
            let path = tmp
                .path()
                .join(&cfg.media.res_dir)
                .join(format!("mipmap-{density}/ic_launcher.png"));
            let img = image::open(&path).expect("readable png");
            assert_eq!(img.width(), *size, "{density}");
            assert_eq!(img.height(), *size, "{density}");
        }
    }

    #[test]
    fn store_icon_lands_in_assets_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let cfg = ReleaseConfig::default();
        let path = write_store_icon(tmp.path(), &cfg).expect("store icon");
        assert_eq!(
            path,
            tmp.path().join(&cfg.media.assets_dir).join("ic_launcher_512.png")
        );
        let img = image::open(&path).expect("readable png");
        assert_eq!(img.dimensions(), (STORE_ICON_SIZE, STORE_ICON_SIZE));
    }
}
