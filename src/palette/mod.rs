//! Block palette model.
//!
//! A palette is an ordered list of entries built in triplets: every semantic
//! color expands into a Level, an Up, and a Down rendering variant sharing
//! one block id and scaffold flag but differing in brightness. The triplet
//! order is a hard contract with [`Direction::from_palette_index`]; the
//! quantizer hands out raw palette indices and the classifier recovers the
//! direction with `index % 3`.

pub mod loader;

pub use loader::{load_from_path, load_csv_pair, load_json};

use crate::types::Direction;
use image::imageops::colorops::ColorMap;
use image::Rgb;

/// One palette entry: a single rendering variant of a semantic color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Rendered color of this variant, brightness-scaled by direction.
    pub color: Rgb<u8>,
    /// Display name of the semantic color (shared across the triplet).
    pub name: String,
    /// Block id placed for this color, e.g. "minecraft:white_wool".
    pub block_id: String,
    /// Whether a scaffold block is placed beneath this block.
    pub scaffold: bool,
    /// Which triplet variant this entry is.
    pub direction: Direction,
}

/// An ordered block palette, always a multiple of three entries long.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append the three rendering variants of one semantic color.
    ///
    /// Variants are pushed in `Direction::ALL` order (Level, Up, Down) so
    /// that `index % 3` recovers the direction.
    pub fn push_color(
        &mut self,
        name: impl Into<String>,
        color: Rgb<u8>,
        block_id: impl Into<String>,
        scaffold: bool,
    ) {
        let name = name.into();
        let block_id = block_id.into();
        for direction in Direction::ALL {
            self.entries.push(PaletteEntry {
                color: scale_brightness(color, direction.brightness()),
                name: name.clone(),
                block_id: block_id.clone(),
                scaffold,
                direction,
            });
        }
    }

    /// Look up an entry by palette index.
    pub fn entry(&self, index: u8) -> Option<&PaletteEntry> {
        self.entries.get(index as usize)
    }

    /// Number of palette entries (three per semantic color).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of semantic colors.
    pub fn color_count(&self) -> usize {
        self.entries.len() / 3
    }

    /// Number of semantic colors that require scaffolding.
    pub fn scaffold_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.scaffold && e.direction == Direction::Level)
            .count()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }
}

/// Scale an RGB color by `numerator / 255`.
fn scale_brightness(color: Rgb<u8>, numerator: u16) -> Rgb<u8> {
    let Rgb([r, g, b]) = color;
    Rgb([
        (r as u16 * numerator / 255) as u8,
        (g as u16 * numerator / 255) as u8,
        (b as u16 * numerator / 255) as u8,
    ])
}

/// Nearest-color map over a palette, for use with [`image::imageops::dither`].
///
/// Distance is squared euclidean in RGB; no perceptual weighting. The index
/// returned by `index_of` is the raw palette index the rest of the pipeline
/// consumes.
pub struct PaletteColorMap<'a> {
    palette: &'a Palette,
}

impl<'a> PaletteColorMap<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }
}

impl ColorMap for PaletteColorMap<'_> {
    type Color = Rgb<u8>;

    fn index_of(&self, color: &Rgb<u8>) -> usize {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, entry) in self.palette.entries.iter().enumerate() {
            let dist = color
                .0
                .iter()
                .zip(entry.color.0.iter())
                .map(|(&a, &b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    fn lookup(&self, index: usize) -> Option<Rgb<u8>> {
        self.palette.entries.get(index).map(|e| e.color)
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Rgb<u8>) {
        if let Some(mapped) = self.lookup(self.index_of(color)) {
            *color = mapped;
        }
    }
}
