//! Store screenshot painter.
//!
//! Screenshots are 1080x1920 phone portraits: a softly textured brand
//! background, centered title and subtitle, a bulleted feature column,
//! and a small launcher icon in the top-right corner.

use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, Rgba, RgbaImage};
use shipwright_core::{ReleaseConfig, ScreenshotSpec};
use tracing::debug;

use crate::canvas::{self, Palette};
use crate::error::{image_err, io_err, MediaError};
use crate::font;
use crate::icon;

pub const SCREENSHOT_WIDTH: u32 = 1080;
pub const SCREENSHOT_HEIGHT: u32 = 1920;

/// Vertical spacing of the background texture lines, in pixels.
const TEXTURE_STEP: u32 = 20;

/// Paint one screenshot from its spec.
pub fn paint_screenshot(spec: &ScreenshotSpec, palette: &Palette, monogram: char) -> RgbaImage {
    let mut img = canvas::solid(SCREENSHOT_WIDTH, SCREENSHOT_HEIGHT, palette.background);

    // Texture: a slightly lighter line every TEXTURE_STEP rows.
    let texture = Rgba([
        palette.background[0].saturating_add(5),
        palette.background[1].saturating_add(5),
        palette.background[2].saturating_add(5),
        255,
    ]);
    let mut y = 0;
    while y < SCREENSHOT_HEIGHT {
        canvas::hline(&mut img, y, texture);
        y += TEXTURE_STEP;
    }

    font::draw_text_centered(&mut img, &spec.title, 80, 6, palette.foreground);
    font::draw_text_centered(&mut img, &spec.subtitle, 150, 4, palette.accent);

    let mut row_y: i64 = 220;
    for feature in &spec.features {
        canvas::fill_circle(&mut img, 105, row_y + 10, 5, palette.accent);
        font::draw_text(&mut img, feature, 130, row_y, 3, palette.muted);
        row_y += 50;
    }

    let badge = icon::paint_icon(100, palette, monogram);
    imageops::overlay(&mut img, &badge, i64::from(SCREENSHOT_WIDTH) - 150, 50);
    img
}

/// Write one PNG per configured screenshot spec, numbered from 1.
pub fn write_screenshots(root: &Path, cfg: &ReleaseConfig) -> Result<Vec<PathBuf>, MediaError> {
    let palette = Palette::from_config(&cfg.media)?;
    let monogram = cfg.app.monogram();
    let dir = root.join(&cfg.media.assets_dir).join("screenshots");
    fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;

    let mut written = Vec::new();
    for (index, spec) in cfg.media.screenshots.iter().enumerate() {
        let path = dir.join(format!("screenshot_{}.png", index + 1));
        paint_screenshot(spec, &palette, monogram)
            .save(&path)
            .map_err(|e| image_err(&path, e))?;
        debug!(path = %path.display(), "screenshot written");
        written.push(path);
    }
    Ok(written)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
