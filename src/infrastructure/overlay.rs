use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use tracing::{info, warn};

/// Font files probed, in order, when no explicit path is configured.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Title rendering strategy.
///
/// A scalable TrueType font is preferred, but none is guaranteed to exist on
/// the host, so a built-in bitmap font backs it up. Selecting a renderer can
/// log a warning; it never fails.
#[derive(Clone)]
pub enum TextRenderer {
    Scalable(FontArc),
    Bitmap,
}

impl TextRenderer {
    /// Load the overlay font. An explicit `font_path` replaces the probe
    /// list entirely; otherwise well-known system locations are tried.
    pub fn load(font_path: Option<&Path>) -> Self {
        let candidates: Vec<PathBuf> = match font_path {
            Some(path) => vec![path.to_path_buf()],
            None => SYSTEM_FONT_PATHS.iter().map(PathBuf::from).collect(),
        };

        for candidate in candidates {
            match std::fs::read(&candidate) {
                Ok(bytes) => match FontArc::try_from_vec(bytes) {
                    Ok(font) => {
                        info!(path = %candidate.display(), "loaded scalable overlay font");
                        return Self::Scalable(font);
                    }
                    Err(err) => {
                        warn!(path = %candidate.display(), error = %err, "font file is not usable");
                    }
                },
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    warn!(path = %candidate.display(), error = %err, "failed to read font file");
                }
            }
        }

        info!("no scalable font found, falling back to built-in bitmap font");
        Self::Bitmap
    }

    /// Draw `text` with its top-left corner at `(x, y)`. `size` is the
    /// nominal glyph height in pixels; both strategies honor it, and both
    /// clip at the canvas edges.
    pub fn draw(
        &self,
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        x: i32,
        y: i32,
        size: f32,
        text: &str,
    ) {
        match self {
            Self::Scalable(font) => {
                draw_text_mut(canvas, color, x, y, PxScale::from(size), font, text);
            }
            Self::Bitmap => bitmap::draw(canvas, color, x, y, size, text),
        }
    }
}

/// A hand-drawn 5x7 pixel font covering ASCII letters, digits, and common
/// punctuation. Ugly next to a real font, but it keeps the overlay working
/// on hosts with no TrueType fonts installed at all.
mod bitmap {
    use image::{Rgb, RgbImage};

    const GLYPH_WIDTH: u32 = 5;
    const GLYPH_HEIGHT: u32 = 7;
    /// Horizontal advance per character, including one column of spacing.
    const ADVANCE: u32 = GLYPH_WIDTH + 1;

    pub(super) fn draw(
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        x: i32,
        y: i32,
        size: f32,
        text: &str,
    ) {
        let scale = (size / GLYPH_HEIGHT as f32).round().max(1.0) as u32;

        let mut pen_x = x;
        for c in text.chars() {
            if let Some(rows) = glyph(c) {
                blit(canvas, color, pen_x, y, scale, rows);
            }
            // Unknown characters advance like a space.
            pen_x += (ADVANCE * scale) as i32;
        }
    }

    fn blit(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32, rows: [u8; 7]) {
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0b1_0000 >> col) == 0 {
                    continue;
                }
                fill_block(
                    canvas,
                    color,
                    x + (col * scale) as i32,
                    y + (row as u32 * scale) as i32,
                    scale,
                );
            }
        }
    }

    /// Fill one scaled font pixel, skipping anything outside the canvas.
    fn fill_block(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32) {
        for dy in 0..scale {
            for dx in 0..scale {
                let px = x + dx as i32;
                let py = y + dy as i32;
                if px >= 0
                    && py >= 0
                    && (px as u32) < canvas.width()
                    && (py as u32) < canvas.height()
                {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }

    /// Glyph raster for a character: one byte per row, low five bits used,
    /// most significant of the five on the left. Lowercase letters map onto
    /// the uppercase rasters.
    fn glyph(c: char) -> Option<[u8; 7]> {
        let c = if c.is_ascii_lowercase() {
            c.to_ascii_uppercase()
        } else {
            c
        };

        let rows = match c {
            ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
            '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
            '"' => [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00],
            '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
            '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
            '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
            '\'' => [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
            '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
            ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
            '*' => [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00],
            '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
            ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
            '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
            '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
            '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
            '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
            '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
            '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
            '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
            '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
            '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
            '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
            '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
            '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
            '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
            ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
            ';' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08],
            '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
            '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
            'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
            'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
            'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
            'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
            'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
            'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
            'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
            'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
            'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
            'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
            'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
            'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
            'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
            'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
            'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
            'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
            'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
            'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
            'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
            'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
            'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
            'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
            'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
            'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
            'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
            'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
            '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
            _ => return None,
        };

        Some(rows)
    }

}
