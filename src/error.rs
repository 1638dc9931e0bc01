//! Error types for map-art generation.

use thiserror::Error;

/// Result type alias using MapartError.
pub type Result<T> = std::result::Result<T, MapartError>;

/// Main error type for map-art generation.
///
/// Every stage returns `Result` rather than aborting the process; any error
/// fails the whole conversion. There is no partial-output mode.
#[derive(Error, Debug)]
pub enum MapartError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to parse a JSON palette.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed row or value in a palette table.
    #[error("Palette format error: {0}")]
    PaletteFormat(String),

    /// Two block-choice rows share the same color name.
    #[error("Duplicate block choice: {0}")]
    DuplicateBlockChoice(String),

    /// A palette color references a name with no block choice.
    #[error("Unknown block choice: {0}")]
    UnknownBlockChoice(String),

    /// A level-tagged run coexists with other runs in the same column.
    #[error("Invalid run structure in column {column}: {reason}")]
    InvalidRunStructure { column: usize, reason: String },

    /// The synthesized elevations contradict the direction stream.
    ///
    /// This is an internal-consistency assertion; it indicates a defect in
    /// the synthesizer, not bad input data.
    #[error("Internal consistency error in column {column}: {reason}")]
    InternalConsistency { column: usize, reason: String },

    /// An elevation left the allowed [1, 255] range after re-basing.
    #[error("Elevation {elevation} out of range [1, 255] in column {column}")]
    ElevationRange { column: usize, elevation: i32 },

    /// A voxel placement fell outside the grid's vertical bounds.
    #[error("Voxel y coordinate {y} out of range [0, 255]")]
    GridBounds { y: i32 },

    /// Failed to export the voxel grid.
    #[error("Export error: {0}")]
    Export(String),

    /// A reserved option that has no implementation was requested.
    #[error("Unimplemented option: {0}")]
    Unimplemented(String),
}
