//! Voxel placement emission: turning a validated terrain profile into block
//! placements on a [`VoxelGrid`].

use crate::error::{MapartError, Result};
use crate::grid::VoxelGrid;
use crate::palette::Palette;
use crate::profile::TerrainProfile;
use crate::quantize::IndexedImage;
use crate::types::BlockPosition;

/// Emission options.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Block placed beneath a scaffold-flagged block.
    pub scaffold_block: String,
    /// Block standing in for the virtual pixel north of the image: the
    /// synthetic leading row has no pixel of its own, so its one-row
    /// look-back resolves to this instead of an out-of-bounds read.
    pub dummy_block: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            scaffold_block: "minecraft:cobblestone".to_string(),
            dummy_block: "minecraft:smooth_stone".to_string(),
        }
    }
}

/// Emit block placements for a whole profile into the grid.
///
/// For every column x and sequence row i, the block identity comes from the
/// pixel at (x, i - 1): a row's block is determined by the pixel above the
/// placement reference. The main block lands at elevation + 1, keeping grid
/// row 0 reserved; a scaffold-flagged entry also places the scaffold block
/// directly beneath, at the elevation itself.
pub fn emit(
    profile: &TerrainProfile,
    indexed: &IndexedImage,
    palette: &Palette,
    options: &EmitOptions,
    grid: &mut VoxelGrid,
) -> Result<()> {
    for x in 0..profile.width() {
        let column = profile.column(x);
        for (i, &elevation) in column.elevations.iter().enumerate() {
            let (block_id, scaffold) = if i == 0 {
                (options.dummy_block.as_str(), false)
            } else {
                let index = indexed.index_at(x, i as u32 - 1);
                let entry = palette.entry(index).ok_or_else(|| {
                    MapartError::InternalConsistency {
                        column: x as usize,
                        reason: format!("palette index {} out of range", index),
                    }
                })?;
                (entry.block_id.as_str(), entry.scaffold)
            };

            grid.set(BlockPosition::new(x as i32, elevation + 1, i as i32), block_id)?;
            if scaffold {
                grid.set(
                    BlockPosition::new(x as i32, elevation, i as i32),
                    &options.scaffold_block,
                )?;
            }
        }
    }

    Ok(())
}
