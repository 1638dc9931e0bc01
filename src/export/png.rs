//! Dithered preview export.
//!
//! Rebuilds the quantized image from the index grid and palette colors and
//! writes it as a PNG, so the result of dithering can be inspected without
//! loading the schematic.

use crate::error::{MapartError, Result};
use crate::palette::Palette;
use crate::quantize::IndexedImage;
use image::{Rgb, RgbImage};
use std::path::Path;

/// Reconstruct the dithered RGB image from palette indices.
pub fn render_preview(indexed: &IndexedImage, palette: &Palette) -> Result<RgbImage> {
    let mut img = RgbImage::new(indexed.width(), indexed.height());
    for y in 0..indexed.height() {
        for x in 0..indexed.width() {
            let index = indexed.index_at(x, y);
            let entry = palette.entry(index).ok_or_else(|| {
                MapartError::InternalConsistency {
                    column: x as usize,
                    reason: format!("palette index {} out of range", index),
                }
            })?;
            img.put_pixel(x, y, entry.color);
        }
    }
    Ok(img)
}

/// Write the dithered preview as a PNG file.
pub fn write_preview<P: AsRef<Path>>(
    indexed: &IndexedImage,
    palette: &Palette,
    path: P,
) -> Result<()> {
    let img = render_preview(indexed, palette)?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
