//! Color parsing and shape primitives shared by the painters.
//!
//! Everything draws into an [`image::RgbaImage`] through a bounds-guarded
//! pixel setter, so callers can place shapes partially off-canvas without
//! panicking.

use image::{ImageBuffer, Rgba, RgbaImage};
use shipwright_core::MediaConfig;

use crate::error::MediaError;

/// The four brand colors every painter works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub foreground: Rgba<u8>,
    pub accent: Rgba<u8>,
    pub muted: Rgba<u8>,
}

impl Palette {
    /// Parse the configured hex colors into a palette.
    pub fn from_config(media: &MediaConfig) -> Result<Self, MediaError> {
        Ok(Palette {
            background: parse_hex(&media.background)?,
            foreground: parse_hex(&media.foreground)?,
            accent: parse_hex(&media.accent)?,
            muted: parse_hex(&media.muted)?,
        })
    }
}

/// Parse a `#rrggbb` string into an opaque RGBA pixel.
pub fn parse_hex(value: &str) -> Result<Rgba<u8>, MediaError> {
    let bad = || MediaError::Color {
        value: value.to_string(),
    };
    let hex = value.strip_prefix('#').ok_or_else(bad)?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| bad());
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

/// A solid canvas of the given size.
pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    ImageBuffer::from_pixel(width, height, color)
}

/// Set one pixel, ignoring coordinates outside the canvas.
pub(crate) fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Fill an axis-aligned rectangle with its top-left corner at (x, y).
pub fn fill_rect(img: &mut RgbaImage, x: i64, y: i64, width: i64, height: i64, color: Rgba<u8>) {
    for dy in 0..height {
        for dx in 0..width {
            put(img, x + dx, y + dy, color);
        }
    }
}

/// Draw a full-width horizontal line at row `y`.
pub fn hline(img: &mut RgbaImage, y: u32, color: Rgba<u8>) {
    if y >= img.height() {
        return;
    }
    for x in 0..img.width() {
        img.put_pixel(x, y, color);
    }
}

/// Fill a disc centered at (cx, cy).
pub fn fill_circle(img: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Stroke a circle outline of the given width, inset from `radius`.
pub fn draw_ring(img: &mut RgbaImage, cx: i64, cy: i64, radius: i64, width: i64, color: Rgba<u8>) {
    let outer = radius * radius;
    let inner = (radius - width).max(0);
    let inner2 = inner * inner;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d = dx * dx + dy * dy;
            if d <= outer && d >= inner2 {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Repaint the canvas with the base color, lifting the red channel by up
/// to `lift` points from top to bottom.
pub fn vertical_gradient(img: &mut RgbaImage, base: Rgba<u8>, lift: u8) {
    let height = img.height().max(1);
    for y in 0..img.height() {
        let step = (u64::from(y) * u64::from(lift) / u64::from(height)) as u8;
        let row = Rgba([base[0].saturating_add(step), base[1], base[2], base[3]]);
        for x in 0..img.width() {
            img.put_pixel(x, y, row);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
