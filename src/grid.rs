//! Sparse voxel grid that placements are emitted into.

use crate::error::{MapartError, Result};
use crate::types::BlockPosition;
use std::collections::HashMap;

/// Vertical placement bounds, matching the schematic format's height range.
pub const MIN_Y: i32 = 0;
pub const MAX_Y: i32 = 255;

/// A sparse voxel placement target.
///
/// Block ids are interned into an insertion-ordered palette so exporters
/// can write a compact id table. Placements overwrite: setting the same
/// position twice keeps the later block.
#[derive(Debug, Default)]
pub struct VoxelGrid {
    blocks: HashMap<BlockPosition, usize>,
    palette: Vec<String>,
    palette_index: HashMap<String, usize>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block, overwriting anything already at `pos`.
    ///
    /// Placements outside the `[MIN_Y, MAX_Y]` vertical range fail; there
    /// is no clamping.
    pub fn set(&mut self, pos: BlockPosition, block_id: &str) -> Result<()> {
        if pos.y < MIN_Y || pos.y > MAX_Y {
            return Err(MapartError::GridBounds { y: pos.y });
        }

        let id = match self.palette_index.get(block_id) {
            Some(&id) => id,
            None => {
                let id = self.palette.len();
                self.palette.push(block_id.to_string());
                self.palette_index.insert(block_id.to_string(), id);
                id
            }
        };
        self.blocks.insert(pos, id);
        Ok(())
    }

    /// Block id at a position, if any.
    pub fn get(&self, pos: BlockPosition) -> Option<&str> {
        self.blocks
            .get(&pos)
            .map(|&id| self.palette[id].as_str())
    }

    /// Interned palette index at a position, if any.
    pub fn palette_id_at(&self, pos: BlockPosition) -> Option<usize> {
        self.blocks.get(&pos).copied()
    }

    /// The interned block-id palette, in first-use order.
    pub fn block_palette(&self) -> &[String] {
        &self.palette
    }

    /// Number of placed blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate placed blocks in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPosition, &str)> {
        self.blocks
            .iter()
            .map(|(&pos, &id)| (pos, self.palette[id].as_str()))
    }

    /// Inclusive bounding box of all placements, if any exist.
    pub fn bounds(&self) -> Option<(BlockPosition, BlockPosition)> {
        let mut positions = self.blocks.keys();
        let first = *positions.next()?;
        let mut min = first;
        let mut max = first;
        for &pos in positions {
            min.x = min.x.min(pos.x);
            min.y = min.y.min(pos.y);
            min.z = min.z.min(pos.z);
            max.x = max.x.max(pos.x);
            max.y = max.y.max(pos.y);
            max.z = max.z.max(pos.z);
        }
        Some((min, max))
    }
}
