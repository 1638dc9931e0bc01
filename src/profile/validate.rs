//! Invariant validation of synthesized elevation sequences.
//!
//! The synthesizer derives elevations structurally from the direction
//! stream, so these checks can only fail on a synthesizer defect. They run
//! unconditionally as the regression guard for the hardest logic in the
//! crate; a failure aborts the conversion and is never downgraded.

use super::elevation::{MAX_ELEVATION, MIN_ELEVATION};
use crate::error::{MapartError, Result};
use crate::types::Direction;

/// Check an elevation sequence against its direction stream.
///
/// Verifies the length relation (`elevations` is one longer than
/// `directions`), the `[MIN_ELEVATION, MAX_ELEVATION]` range, and per row:
/// level rows keep the elevation, up rows strictly raise it, down rows
/// strictly lower it.
pub fn validate(elevations: &[i32], directions: &[Direction], column: usize) -> Result<()> {
    if elevations.len() != directions.len() + 1 {
        return Err(MapartError::InternalConsistency {
            column,
            reason: format!(
                "expected {} elevations for {} directions, got {}",
                directions.len() + 1,
                directions.len(),
                elevations.len()
            ),
        });
    }

    for &elevation in elevations {
        if elevation < MIN_ELEVATION || elevation > MAX_ELEVATION {
            return Err(MapartError::ElevationRange { column, elevation });
        }
    }

    for (row, &direction) in directions.iter().enumerate() {
        let consistent = match direction {
            Direction::Level => elevations[row] == elevations[row + 1],
            Direction::Up => elevations[row] < elevations[row + 1],
            Direction::Down => elevations[row] > elevations[row + 1],
        };
        if !consistent {
            return Err(MapartError::InternalConsistency {
                column,
                reason: format!(
                    "expected {} at row {}, got elevations {} -> {}",
                    direction,
                    row,
                    elevations[row],
                    elevations[row + 1]
                ),
            });
        }
    }

    Ok(())
}
