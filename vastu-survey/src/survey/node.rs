//! Survey station: one sweep taken at a fixed pose.

use log::{debug, warn};

use crate::core::{Angle, Point};
use crate::extraction::segment_runs;

use super::{SurveyPoint, THRESHOLD, Wall, WallSide};

/// Station of the survey.
///
/// The orientation is the origin of the scan angles of its sweep. The
/// sensor offset (robot frame) is rotated by that orientation into a
/// map-frame correction added to every polar point.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveyNode {
    position: Point,
    orientation: Angle,
    offset: Point,
    correction: Point,
    points: Vec<SurveyPoint>,
    walls: Vec<Wall>,
    left_wall: Option<usize>,
    front_wall: Option<usize>,
    right_wall: Option<usize>,
}

impl SurveyNode {
    pub fn new(position: Point, orientation: Angle, offset: Point) -> Self {
        let (sin, cos) = (orientation.sin(), orientation.cos());
        let correction = Point::new(
            offset.x * cos + offset.y * sin,
            -offset.x * sin + offset.y * cos,
        );
        Self {
            position,
            orientation,
            offset,
            correction,
            points: Vec::new(),
            walls: Vec::new(),
            left_wall: None,
            front_wall: None,
            right_wall: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> Angle {
        self.orientation
    }

    /// Sensor offset in the robot frame.
    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Sensor offset rotated into the map frame.
    #[inline]
    pub fn correction(&self) -> Point {
        self.correction
    }

    pub fn points(&self) -> &[SurveyPoint] {
        &self.points
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a map-frame point and run the validity check.
    pub fn add_point(&mut self, position: Point, raw_angle: f32, raw_distance: f32) -> &SurveyPoint {
        self.push_point(SurveyPoint::new(position, raw_angle, raw_distance))
    }

    /// Append a reading given in polar coordinates relative to the station.
    ///
    /// `angle` is in degrees in the robot frame, `distance` in cm.
    pub fn add_polar_point(&mut self, angle: f32, distance: f32) -> &SurveyPoint {
        let bearing = Angle::from_degrees(angle) + self.orientation;
        let position = Point::new(
            self.position.x + distance * bearing.sin() + self.correction.x,
            self.position.y + distance * bearing.cos() + self.correction.y,
        );
        self.add_point(position, angle, distance)
    }

    /// Append an already built point, keeping its validity flag.
    ///
    /// The validity check can only promote: if the new point lies within
    /// [`THRESHOLD`] of the previously appended one, both become valid.
    pub fn push_point(&mut self, mut point: SurveyPoint) -> &SurveyPoint {
        if let Some(last) = self.points.last_mut()
            && last.distance(&point) < THRESHOLD
        {
            last.is_valid = true;
            point.is_valid = true;
        }
        let index = self.points.len();
        self.points.push(point);
        &self.points[index]
    }

    /// Recompute walls from the current points.
    ///
    /// Runs that cannot be fitted are logged and skipped.
    pub fn compute_wall_data(&mut self) {
        self.walls.clear();
        self.left_wall = None;
        self.front_wall = None;
        self.right_wall = None;

        for run in segment_runs(&self.points) {
            match Wall::from_run(&self.points[run.clone()], run.start) {
                Ok(wall) => {
                    let index = self.walls.len();
                    match wall.side() {
                        WallSide::Left => self.left_wall = Some(index),
                        WallSide::Front => self.front_wall = Some(index),
                        WallSide::Right => self.right_wall = Some(index),
                    }
                    self.walls.push(wall);
                }
                Err(e) => warn!("[Survey] Skipping points {}..{}: {}", run.start, run.end, e),
            }
        }

        debug!(
            "[Survey] Station ({:.1}, {:.1}): {} points, {} walls",
            self.position.x,
            self.position.y,
            self.points.len(),
            self.walls.len()
        );
    }

    /// Last fitted wall on the left, if any.
    pub fn left_wall(&self) -> Option<&Wall> {
        self.left_wall.and_then(|i| self.walls.get(i))
    }

    /// Last fitted wall in front, if any.
    pub fn front_wall(&self) -> Option<&Wall> {
        self.front_wall.and_then(|i| self.walls.get(i))
    }

    /// Last fitted wall on the right, if any.
    pub fn right_wall(&self) -> Option<&Wall> {
        self.right_wall.and_then(|i| self.walls.get(i))
    }

    /// Wall whose line passes closest to the station.
    pub fn nearest_wall(&self) -> Option<&Wall> {
        self.walls
            .iter()
            .filter_map(|w| w.distance_from(self.position).ok().map(|d| (w, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(w, _)| w)
    }

    /// Point with the shortest raw range.
    pub fn nearest_point(&self) -> Option<&SurveyPoint> {
        self.points
            .iter()
            .min_by(|a, b| a.raw_distance.total_cmp(&b.raw_distance))
    }
}
