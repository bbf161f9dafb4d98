use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb};
use thiserror::Error;

use crate::domain::stats::TrendStats;
use crate::infrastructure::overlay::TextRenderer;

/// Top-left corner of the title overlay, tuned for the 1280x720 canvas the
/// generation service is asked for. On smaller images the overlay clips
/// rather than failing.
const TEXT_ANCHOR: (i32, i32) = (50, 600);

/// Nominal title glyph height in pixels.
const TEXT_SIZE: f32 = 60.0;

/// Diagonal offsets for the black outline drawn beneath the title so it
/// stays legible on busy backgrounds.
const OUTLINE_OFFSETS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to decode generated image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode thumbnail as JPEG: {0}")]
    Encode(image::ImageError),
}

/// Decode the generated image, overlay the title when trend stats are
/// present, and encode the result as JPEG.
///
/// Without stats there is nothing to derive a text color from, so the image
/// passes through unannotated. Pure CPU work; callers run it on the
/// blocking pool.
pub fn compose(
    image_bytes: &[u8],
    title: &str,
    stats: Option<&TrendStats>,
    renderer: &TextRenderer,
) -> Result<Vec<u8>, RenderError> {
    let decoded = image::load_from_memory(image_bytes).map_err(RenderError::Decode)?;
    let mut canvas = decoded.to_rgb8();

    if let Some(stats) = stats {
        let (x, y) = TEXT_ANCHOR;
        for (dx, dy) in OUTLINE_OFFSETS {
            renderer.draw(&mut canvas, OUTLINE_COLOR, x + dx, y + dy, TEXT_SIZE, title);
        }

        let [r, g, b] = stats.text_color();
        renderer.draw(&mut canvas, Rgb([r, g, b]), x, y, TEXT_SIZE, title);
    }

    let mut encoded = Vec::new();
    DynamicImage::ImageRgb8(canvas)
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .map_err(RenderError::Encode)?;

    Ok(encoded)
}
