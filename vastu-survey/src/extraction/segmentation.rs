//! Split a sweep into runs of consecutive valid points.

use std::ops::Range;

use crate::survey::{MIN_WALL_POINTS, SurveyPoint, THRESHOLD};

/// Index ranges of the wall candidates in a sweep.
///
/// A run is a maximal sequence of consecutive valid points whose neighbors
/// are closer than [`THRESHOLD`]. An invalid point or a larger jump closes
/// the run. Runs shorter than [`MIN_WALL_POINTS`] are dropped.
pub fn segment_runs(points: &[SurveyPoint]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (i, point) in points.iter().enumerate() {
        if !point.is_valid {
            close_run(&mut runs, start.take(), i);
            continue;
        }
        match start {
            None => start = Some(i),
            Some(s) => {
                if points[i - 1].distance(point) >= THRESHOLD {
                    close_run(&mut runs, Some(s), i);
                    start = Some(i);
                }
            }
        }
    }
    close_run(&mut runs, start, points.len());

    runs
}

fn close_run(runs: &mut Vec<Range<usize>>, start: Option<usize>, end: usize) {
    if let Some(s) = start
        && end - s >= MIN_WALL_POINTS
    {
        runs.push(s..end);
    }
}
