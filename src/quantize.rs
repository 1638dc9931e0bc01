//! Dithered quantization of an image to palette indices.
//!
//! Floyd-Steinberg error diffusion comes from the `image` crate; this module
//! only supplies the palette as a [`ColorMap`] and reads back the per-pixel
//! indices the rest of the pipeline consumes.

use crate::error::{MapartError, Result};
use crate::palette::{Palette, PaletteColorMap};
use image::imageops::colorops::ColorMap;
use image::DynamicImage;

/// A quantized image: one 8-bit palette index per pixel, row-major.
#[derive(Debug, Clone)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    indices: Vec<u8>,
}

impl IndexedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index at (x, y). Panics if out of bounds.
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height);
        self.indices[(y * self.width + x) as usize]
    }

    /// The indices of column `x`, top row to bottom row.
    pub fn column(&self, x: u32) -> Vec<u8> {
        (0..self.height).map(|y| self.index_at(x, y)).collect()
    }
}

/// Quantize an image against a palette with Floyd-Steinberg dithering.
///
/// The palette must be non-empty and addressable with 8-bit indices.
pub fn quantize(img: &DynamicImage, palette: &Palette) -> Result<IndexedImage> {
    if palette.is_empty() {
        return Err(MapartError::PaletteFormat("palette is empty".to_string()));
    }
    if palette.len() > 256 {
        return Err(MapartError::PaletteFormat(format!(
            "palette has {} entries, more than 8-bit indices can address",
            palette.len()
        )));
    }

    let map = PaletteColorMap::new(palette);
    let mut rgb = img.to_rgb8();
    // The crate's Floyd-Steinberg always writes the right-hand neighbor, so
    // a single-column image would read out of bounds (and a zero-height one
    // underflows its row loop). With no neighbor to diffuse into,
    // nearest-match is the exact dither result, so such images skip the
    // diffusion pass and map directly.
    if rgb.width() >= 2 && rgb.height() >= 1 {
        image::imageops::dither(&mut rgb, &map);
    }

    let (width, height) = rgb.dimensions();
    let indices = rgb.pixels().map(|p| map.index_of(p) as u8).collect();

    Ok(IndexedImage {
        width,
        height,
        indices,
    })
}
