//! # Mapart Gen
//!
//! A Rust library for generating Minecraft map-art terrain schematics from
//! images.
//!
//! ## Overview
//!
//! This library takes an image and a block palette as input, and produces a
//! voxel terrain whose surface renders the image when viewed on a map: each
//! image column becomes a vertical strip of blocks whose elevation steps up,
//! down, or stays level row by row, following which brightness variant of a
//! palette color each dithered pixel landed on.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mapart_gen::{convert, export, palette, EmitOptions, ProfilerConfig};
//!
//! // Load a palette (JSON, or a CSV color table + block-choice table)
//! let palette = palette::load_from_path("palette.json", None)?;
//!
//! // Decode the input image
//! let img = image::open("input.jpg")?;
//!
//! // Run the pipeline: dither, profile, validate, emit
//! let conversion = convert(
//!     &img,
//!     &palette,
//!     &ProfilerConfig::default(),
//!     &EmitOptions::default(),
//! )?;
//!
//! // Persist as a Sponge schematic
//! export::write_schem_to_path(&conversion.grid, "output.schem")?;
//! ```

pub mod emit;
pub mod error;
pub mod export;
pub mod grid;
pub mod palette;
pub mod profile;
pub mod quantize;
pub mod types;

// Re-export main types for convenience
pub use emit::EmitOptions;
pub use error::{MapartError, Result};
pub use grid::VoxelGrid;
pub use palette::{Palette, PaletteEntry};
pub use profile::{ColumnProfile, Profiler, ProfilerConfig, Run, TerrainProfile};
pub use quantize::IndexedImage;
pub use types::{BlockPosition, Direction};

use image::DynamicImage;

/// Everything a full conversion produces.
#[derive(Debug)]
pub struct Conversion {
    /// The emitted voxel placements.
    pub grid: VoxelGrid,
    /// The quantized image, for preview export.
    pub indexed: IndexedImage,
    /// The per-column terrain profile.
    pub profile: TerrainProfile,
}

/// Run the whole pipeline on a decoded image.
///
/// Quantizes against the palette, synthesizes and validates the terrain
/// profile, and emits block placements. Any stage error fails the whole
/// conversion.
pub fn convert(
    img: &DynamicImage,
    palette: &Palette,
    config: &ProfilerConfig,
    options: &EmitOptions,
) -> Result<Conversion> {
    let indexed = quantize::quantize(img, palette)?;
    let profile = Profiler::with_config(config.clone()).profile(&indexed)?;

    let mut grid = VoxelGrid::new();
    emit::emit(&profile, &indexed, palette, options, &mut grid)?;

    Ok(Conversion {
        grid,
        indexed,
        profile,
    })
}
