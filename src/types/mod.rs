//! Shared types used throughout the library.

use serde::{Deserialize, Serialize};

/// Vertical movement of a terrain column relative to the block to its north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Same elevation as the block to the north.
    Level,
    /// One block higher than the block to the north.
    Up,
    /// One block lower than the block to the north.
    Down,
}

impl Direction {
    /// All three directions, in palette-triplet order.
    pub const ALL: [Direction; 3] = [Direction::Level, Direction::Up, Direction::Down];

    /// Classify a palette index into a direction.
    ///
    /// The palette is built in triplets of (Level, Up, Down) variants per
    /// semantic color, so the direction is `index % 3`. This is the single
    /// place that encodes the triplet-ordering contract; palette
    /// construction in [`crate::palette`] must match it.
    pub fn from_palette_index(index: u8) -> Direction {
        match index % 3 {
            0 => Direction::Level,
            1 => Direction::Up,
            _ => Direction::Down,
        }
    }

    /// Position of this direction within a palette triplet.
    pub fn triplet_offset(&self) -> usize {
        match self {
            Direction::Level => 0,
            Direction::Up => 1,
            Direction::Down => 2,
        }
    }

    /// Brightness numerator applied to this direction's rendered color
    /// variant, out of 255.
    ///
    /// Up-facing surfaces catch full light, level surfaces slightly less,
    /// down-facing the least. Matches how Minecraft maps shade terrain.
    pub fn brightness(&self) -> u16 {
        match self {
            Direction::Level => 220,
            Direction::Up => 255,
            Direction::Down => 180,
        }
    }

    /// The elevation change one row in this direction contributes.
    pub fn step(&self) -> i32 {
        match self {
            Direction::Level => 0,
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Level => write!(f, "level"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A block position in 3D space.
///
/// `x` is the image column, `y` the elevation, `z` the image row (north to
/// south).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}
