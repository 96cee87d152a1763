//! Feature graphic painter for the store listing header.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use shipwright_core::ReleaseConfig;
use tracing::debug;

use crate::canvas::{self, Palette};
use crate::error::{image_err, io_err, MediaError};
use crate::font;

pub const GRAPHIC_WIDTH: u32 = 1024;
pub const GRAPHIC_HEIGHT: u32 = 500;

/// How far the red channel rises over the banner's height.
const GRADIENT_LIFT: u8 = 20;

/// Paint the 1024x500 banner: gradient background, centered app label
/// and tagline, and a row of four accent dots underneath.
pub fn paint_feature_graphic(label: &str, tagline: &str, palette: &Palette) -> RgbaImage {
    let mut img = RgbaImage::new(GRAPHIC_WIDTH, GRAPHIC_HEIGHT);
    canvas::vertical_gradient(&mut img, palette.background, GRADIENT_LIFT);

    font::draw_text_centered(&mut img, label, 150, 9, palette.foreground);
    font::draw_text_centered(&mut img, tagline, 250, 4, palette.accent);

    for i in 0..4 {
        canvas::fill_circle(&mut img, 115 + i * 200, 365, 15, palette.accent);
    }
    img
}

/// Write `feature_graphic.png` into the assets dir.
pub fn write_feature_graphic(root: &Path, cfg: &ReleaseConfig) -> Result<PathBuf, MediaError> {
    let palette = Palette::from_config(&cfg.media)?;
    let assets_dir = root.join(&cfg.media.assets_dir);
    fs::create_dir_all(&assets_dir).map_err(|e| io_err(&assets_dir, e))?;
    let path = assets_dir.join("feature_graphic.png");
    paint_feature_graphic(&cfg.app.label, &cfg.media.tagline, &palette)
        .save(&path)
        .map_err(|e| image_err(&path, e))?;
    debug!(path = %path.display(), "feature graphic written");
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
