//! Terrain profile synthesis.
//!
//! This module turns a quantized image into a validated per-column terrain
//! profile: each pixel classifies into a movement direction, each column's
//! direction stream groups into runs, and each run list synthesizes into an
//! elevation sequence that is checked against the stream before anything is
//! placed.

pub mod elevation;
pub mod runs;
pub mod validate;

pub use elevation::{MAX_ELEVATION, MIN_ELEVATION};
pub use runs::Run;

use crate::error::{MapartError, Result};
use crate::quantize::IndexedImage;
use crate::types::Direction;
use rayon::prelude::*;

/// Profiler configuration.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Reserved staircase mode. There is no implementation; requesting it
    /// fails the conversion rather than being silently ignored.
    pub staircase: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self { staircase: false }
    }
}

/// The synthesized profile of a single image column.
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    /// Per-row movement directions, top row to bottom row.
    pub directions: Vec<Direction>,
    /// Maximal movement runs over `directions`.
    pub runs: Vec<Run>,
    /// One elevation per row plus the synthetic leading reference row;
    /// always exactly one longer than `directions`.
    pub elevations: Vec<i32>,
}

/// A whole image's terrain profile, one entry per column.
#[derive(Debug, Clone)]
pub struct TerrainProfile {
    columns: Vec<ColumnProfile>,
    height: u32,
}

impl TerrainProfile {
    pub fn width(&self) -> u32 {
        self.columns.len() as u32
    }

    /// Image height in rows (one less than each elevation sequence).
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn columns(&self) -> &[ColumnProfile] {
        &self.columns
    }

    pub fn column(&self, x: u32) -> &ColumnProfile {
        &self.columns[x as usize]
    }

    /// Highest elevation across all columns, for sizing the output grid.
    pub fn max_elevation(&self) -> i32 {
        self.columns
            .iter()
            .flat_map(|c| c.elevations.iter().copied())
            .max()
            .unwrap_or(MIN_ELEVATION)
    }
}

/// Classify one column of palette indices into movement directions.
///
/// Row order is preserved; the mapping itself lives in
/// [`Direction::from_palette_index`].
pub fn classify_column(indices: &[u8]) -> Vec<Direction> {
    indices
        .iter()
        .map(|&index| Direction::from_palette_index(index))
        .collect()
}

/// The terrain profile synthesizer.
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self {
            config: ProfilerConfig::default(),
        }
    }

    /// Create a profiler with custom configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Synthesize the terrain profile for a quantized image.
    ///
    /// Columns share no state and are processed in parallel; any column
    /// error fails the whole profile.
    pub fn profile(&self, indexed: &IndexedImage) -> Result<TerrainProfile> {
        if self.config.staircase {
            return Err(MapartError::Unimplemented("staircase mode".to_string()));
        }

        let columns = (0..indexed.width())
            .into_par_iter()
            .map(|x| self.profile_column(indexed.column(x), x as usize))
            .collect::<Result<Vec<_>>>()?;

        Ok(TerrainProfile {
            columns,
            height: indexed.height(),
        })
    }

    fn profile_column(&self, indices: Vec<u8>, column: usize) -> Result<ColumnProfile> {
        let directions = classify_column(&indices);
        let runs = runs::group_runs(&directions);
        let elevations = elevation::synthesize(&runs, &directions, column)?;
        validate::validate(&elevations, &directions, column)?;

        Ok(ColumnProfile {
            directions,
            runs,
            elevations,
        })
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
