//! Run grouping: compressing a column's direction stream into maximal
//! movement runs.

use crate::types::Direction;

/// A maximal grouping of same-direction movement within one column.
///
/// Level rows inside a movement run are absorbed: they extend `length` but
/// not `height`. A run's `height` is therefore the number of actual steps
/// taken, and `length` the number of rows it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub direction: Direction,
    /// Count of non-level steps in the run.
    pub height: usize,
    /// Count of rows the run spans, absorbed level rows included.
    pub length: usize,
}

/// Group a column's direction stream into runs.
///
/// The open run starts level: a column always begins conceptually flat, so
/// the first movement row converts the open run in place rather than
/// closing it. Only a conflicting movement direction closes a run. The sum
/// of run lengths always equals the stream length; an empty stream yields
/// no runs, and an all-level column yields exactly one level run.
pub fn group_runs(directions: &[Direction]) -> Vec<Run> {
    let mut runs = Vec::new();
    if directions.is_empty() {
        return runs;
    }

    let mut direction = Direction::Level;
    let mut height = 0;
    let mut length = 0;

    for &row in directions {
        if row == Direction::Level {
            length += 1;
        } else if row != direction {
            if direction == Direction::Level {
                // First movement of the column: the open run becomes this
                // direction in place.
                direction = row;
                length += 1;
                height += 1;
            } else {
                runs.push(Run {
                    direction,
                    height,
                    length,
                });
                direction = row;
                height = 1;
                length = 1;
            }
        } else {
            length += 1;
            height += 1;
        }
    }

    runs.push(Run {
        direction,
        height,
        length,
    });

    runs
}
