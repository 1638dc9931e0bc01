//! Elevation synthesis: turning runs plus the raw direction stream into one
//! integer elevation per row.

use super::runs::Run;
use crate::error::{MapartError, Result};
use crate::types::Direction;

/// Reserved floor: row 0 stays free for a scaffold block beneath the lowest
/// placed block.
pub const MIN_ELEVATION: i32 = 1;

/// Highest elevation a column may reach after re-basing.
///
/// Emission places the main block one row above the elevation, so a column
/// that actually reaches this value still fails the conversion at the grid
/// write; emittable columns peak at `MAX_ELEVATION - 1`. The caller bounds
/// image height and directional volatility to stay inside the range.
pub const MAX_ELEVATION: i32 = 255;

/// Synthesize the elevation sequence for one column.
///
/// The output is one element longer than the direction stream: element 0 is
/// the synthetic reference row north of the image, at baseline 0 before
/// re-basing. Each run advances `length` rows, stepping by the *recorded*
/// per-row direction rather than the run tag, since level rows absorbed
/// into a movement run keep the previous elevation.
///
/// A level-tagged run is only legal as a column's sole run; mixing it with
/// movement runs would make the flat start ambiguous and is rejected here,
/// before any elevations are produced. A conflicting direction inside a
/// movement run can only mean the grouper is broken and fails the same way.
///
/// After all rows, the column is re-based upward if its minimum would dip
/// below [`MIN_ELEVATION`], so the lowest point lands exactly on it. There
/// is no downward shift and no clamping; exceeding [`MAX_ELEVATION`] after
/// re-basing is a fatal range error.
pub fn synthesize(runs: &[Run], directions: &[Direction], column: usize) -> Result<Vec<i32>> {
    let mut elevations = Vec::with_capacity(directions.len() + 1);
    elevations.push(0);

    for run in runs {
        match run.direction {
            Direction::Level => {
                if runs.len() != 1 {
                    return Err(MapartError::InvalidRunStructure {
                        column,
                        reason: "column starting with a level run cannot have further runs"
                            .to_string(),
                    });
                }
                for _ in 0..directions.len() {
                    elevations.push(0);
                }
            }
            tag @ (Direction::Up | Direction::Down) => {
                for _ in 0..run.length {
                    let row = elevations.len() - 1;
                    if row >= directions.len() {
                        return Err(MapartError::InternalConsistency {
                            column,
                            reason: "run lengths exceed the direction stream".to_string(),
                        });
                    }
                    let previous = elevations[row];
                    let direction = directions[row];
                    if direction != Direction::Level && direction != tag {
                        return Err(MapartError::InternalConsistency {
                            column,
                            reason: format!("unexpected {} in {} run at row {}", direction, tag, row),
                        });
                    }
                    elevations.push(previous + direction.step());
                }
            }
        }
    }

    rebase(&mut elevations);

    for &elevation in &elevations {
        if elevation < MIN_ELEVATION || elevation > MAX_ELEVATION {
            return Err(MapartError::ElevationRange { column, elevation });
        }
    }

    Ok(elevations)
}

/// Shift the whole column upward so its minimum lands on [`MIN_ELEVATION`].
///
/// Columns already at or above the floor are left untouched.
fn rebase(elevations: &mut [i32]) {
    let min = elevations.iter().copied().min().unwrap_or(MIN_ELEVATION);
    if min < MIN_ELEVATION {
        let shift = MIN_ELEVATION - min;
        for elevation in elevations.iter_mut() {
            *elevation += shift;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::runs::group_runs;
    use Direction::{Down, Level, Up};

    fn synth(directions: &[Direction]) -> Result<Vec<i32>> {
        synthesize(&group_runs(directions), directions, 0)
    }

    #[test]
    fn test_flat_column_rebases_to_floor() {
        // Baseline 0, min 0, shifted up by 1.
        assert_eq!(synth(&[Level, Level]).unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn test_up_up_down() {
        // Raw [0,1,2,1], min 0, shift +1.
        assert_eq!(synth(&[Up, Up, Down]).unwrap(), vec![1, 2, 3, 2]);
    }

    #[test]
    fn test_down_down_rebases_by_three() {
        // Raw [0,-1,-2], min -2, shift +3.
        assert_eq!(synth(&[Down, Down]).unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn test_rising_column_shifts_baseline_to_floor() {
        // Raw [0,1,1,2]: min 0, shift +1, ups preserved.
        assert_eq!(synth(&[Up, Level, Up]).unwrap(), vec![1, 2, 2, 3]);
    }

    #[test]
    fn test_absorbed_level_rows_copy_previous_elevation() {
        assert_eq!(
            synth(&[Down, Level, Down, Level]).unwrap(),
            vec![3, 2, 2, 1, 1]
        );
    }

    #[test]
    fn test_length_is_directions_plus_one() {
        let directions = [Up, Down, Up, Level, Down, Down, Up];
        let elevations = synth(&directions).unwrap();
        assert_eq!(elevations.len(), directions.len() + 1);
    }

    #[test]
    fn test_level_run_mixed_with_movement_rejected() {
        // Hand-built malformed run list: a level run followed by a movement
        // run must be rejected before any synthesis happens.
        let directions = [Level, Level, Up];
        let runs = vec![
            Run {
                direction: Level,
                height: 0,
                length: 2,
            },
            Run {
                direction: Up,
                height: 1,
                length: 1,
            },
        ];
        let err = synthesize(&runs, &directions, 7).unwrap_err();
        assert!(matches!(err, MapartError::InvalidRunStructure { column: 7, .. }));
    }

    #[test]
    fn test_conflicting_direction_inside_run_is_consistency_error() {
        // A down row inside an up-tagged run cannot come from the grouper.
        let directions = [Up, Down];
        let runs = vec![Run {
            direction: Up,
            height: 2,
            length: 2,
        }];
        let err = synthesize(&runs, &directions, 0).unwrap_err();
        assert!(matches!(err, MapartError::InternalConsistency { .. }));
    }

    #[test]
    fn test_elevation_above_ceiling_rejected() {
        let directions = vec![Up; MAX_ELEVATION as usize];
        let err = synth(&directions).unwrap_err();
        assert!(matches!(err, MapartError::ElevationRange { .. }));
    }

    #[test]
    fn test_tallest_legal_column_accepted() {
        let directions = vec![Up; (MAX_ELEVATION - 1) as usize];
        let elevations = synth(&directions).unwrap();
        assert_eq!(*elevations.last().unwrap(), MAX_ELEVATION);
    }
}
